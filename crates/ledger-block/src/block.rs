use crate::constants::MAX_PREALLOCATED_ITEMS;
use crate::cursor::{BufferWriter, Reader, SliceReader, StreamReader, Writer};
use crate::error::{DecodeError, Result};
use crate::hash::Hash;
use crate::header::BlockHeader;
use crate::merkle::build_merkle_root;
use crate::transaction::{Decodable, Encodable, Transaction};
use crate::varint::var_int_size;
use serde::{Deserialize, Serialize};
use std::io;
use tracing::{debug, trace};

/// A header plus its ordered transactions.
///
/// Layout on the wire: the header's 80 fixed bytes, a var-int transaction
/// count, then each transaction. `Block::default()` is the empty state: no
/// transactions and an invalid header.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Network message name for a block payload.
    pub const COMMAND: &'static str = "block";

    pub fn new(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self { header, transactions }
    }

    /// A block with transactions is valid whatever its header holds; an
    /// empty one only if its header validates on its own.
    pub fn is_valid(&self) -> bool {
        !self.transactions.is_empty() || self.header.is_valid()
    }

    pub fn reset(&mut self) {
        self.header.reset();
        self.transactions.clear();
    }

    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    pub fn decode<R: Reader + ?Sized>(source: &mut R) -> Result<Self> {
        let mut block = Self::default();
        block.read_from(source)?;
        Ok(block)
    }

    /// Decodes in place. On failure the block is left in the empty state, so
    /// a partially read block is never observable.
    pub fn read_from<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        self.reset();
        let start = source.position();
        let result = self.read_fields(source);
        if let Err(err) = &result {
            debug!(
                offset = source.position(),
                consumed = source.position() - start,
                error = %err,
                "block decode failed"
            );
            self.reset();
        }
        result
    }

    fn read_fields<R: Reader + ?Sized>(&mut self, source: &mut R) -> Result<()> {
        self.header = BlockHeader::decode(source, false)?;
        let declared = source.read_var_int()?;
        self.header.transaction_count = declared;

        self.transactions = Vec::with_capacity((declared as usize).min(MAX_PREALLOCATED_ITEMS));
        for index in 0..declared {
            let tx = Transaction::decode(source).map_err(|err| DecodeError::CountMismatch {
                declared,
                decoded: index,
                source: Box::new(err),
            })?;
            trace!(index, offset = source.position(), "transaction decoded");
            self.transactions.push(tx);
        }
        Ok(())
    }

    /// Decodes a buffer that must hold exactly one block and nothing else.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut source = SliceReader::new(data);
        let block = Self::decode(&mut source)?;
        if !source.is_exhausted() {
            return Err(DecodeError::TrailingBytes {
                remaining: source.remaining(),
            });
        }
        Ok(block)
    }

    /// Decodes one block from the front of `stream`.
    pub fn from_stream<R: io::Read>(stream: R) -> Result<Self> {
        Self::decode(&mut StreamReader::new(stream))
    }

    pub fn from_hex(text: &str) -> Result<Self> {
        let data = hex::decode(text.trim())
            .map_err(|e| DecodeError::malformed("hex", e.to_string()))?;
        Self::from_bytes(&data)
    }

    pub fn encode_to<W: Writer + ?Sized>(&self, sink: &mut W) -> io::Result<()> {
        let start = sink.position();
        self.header.encode_to(sink, false)?;
        sink.write_var_int(self.transactions.len() as u64)?;
        for tx in &self.transactions {
            tx.encode_to(sink)?;
        }
        debug_assert_eq!(
            sink.position() - start,
            self.serialized_size(),
            "block encoding disagrees with its size accounting"
        );
        Ok(())
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut sink = BufferWriter::with_capacity(self.serialized_size() as usize);
        self.encode_to(&mut sink)
            .expect("buffer writes don't error");
        sink.into_inner()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }

    pub fn serialized_size(&self) -> u64 {
        self.header.serialized_size(false)
            + var_int_size(self.transactions.len() as u64)
            + self
                .transactions
                .iter()
                .map(Encodable::serialized_size)
                .sum::<u64>()
    }

    /// Merkle root over the identity hashes of `transactions`, in order.
    pub fn generate_merkle_root(transactions: &[Transaction]) -> Hash {
        let hashes: Vec<Hash> = transactions.iter().map(Transaction::hash).collect();
        build_merkle_root(&hashes)
    }

    pub fn merkle_root(&self) -> Hash {
        Self::generate_merkle_root(&self.transactions)
    }
}
