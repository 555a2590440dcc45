//! Block wire codec, Merkle root and the compiled-in genesis blocks.
//!
//! ```
//! use ledger_block::{build_merkle_root, Block, Network};
//!
//! let genesis = Network::Mainnet.genesis();
//! let bytes = genesis.encode();
//! let decoded = Block::from_bytes(&bytes).unwrap();
//! assert_eq!(decoded.merkle_root(), genesis.header.merkle);
//! assert_eq!(build_merkle_root(&[]), [0u8; 32]);
//! ```

pub mod block;
pub mod constants;
pub mod cursor;
pub mod error;
pub mod genesis;
pub mod hash;
pub mod header;
pub mod merkle;
pub mod transaction;
pub mod varint;

pub use block::Block;
pub use cursor::{BufferWriter, HashWriter, Reader, SliceReader, StreamReader, StreamWriter, Writer};
pub use error::{DecodeError, Result};
pub use genesis::{genesis_mainnet, genesis_testnet, Network};
pub use hash::{decode_hash, double_sha256, encode_hash, Hash, NULL_HASH};
pub use header::BlockHeader;
pub use merkle::build_merkle_root;
pub use transaction::{Decodable, Encodable, OutPoint, Transaction, TxInput, TxOutput};
pub use varint::var_int_size;
