//! The first block of each network, compiled in as hex.
//!
//! Both blocks are decoded once per process and then shared by reference.
//! They are checked on first use; a failing check means the constants or the
//! codec are broken and the process panics instead of returning an error.

use crate::block::Block;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::info;

const MAINNET_GENESIS_HEX: &str = concat!(
    "01000000",
    "0000000000000000000000000000000000000000000000000000000000000000",
    "3ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a",
    "29ab5f49",
    "ffff001d",
    "1dac2b7c",
    "01",
    "01000000",
    "01",
    "0000000000000000000000000000000000000000000000000000000000000000ffffffff",
    "4d",
    "04ffff001d0104455468652054696d65732030332f4a616e2f32303039204368616e63656c6c6f72",
    "206f6e206272696e6b206f66207365636f6e64206261696c6f757420666f722062616e6b73",
    "ffffffff",
    "01",
    "00f2052a01000000",
    "43",
    "4104678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38",
    "c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5fac",
    "00000000",
);

const TESTNET_GENESIS_HEX: &str = concat!(
    "01000000",
    "0000000000000000000000000000000000000000000000000000000000000000",
    "3ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa4b1e5e4a",
    "dae5494d",
    "ffff001d",
    "1aa4ae18",
    "01",
    "01000000",
    "01",
    "0000000000000000000000000000000000000000000000000000000000000000ffffffff",
    "4d",
    "04ffff001d0104455468652054696d65732030332f4a616e2f32303039204368616e63656c6c6f72",
    "206f6e206272696e6b206f66207365636f6e64206261696c6f757420666f722062616e6b73",
    "ffffffff",
    "01",
    "00f2052a01000000",
    "43",
    "4104678afdb0fe5548271967f1a67130b7105cd6a828e03909a67962e0ea1f61deb649f6bc3f4cef38",
    "c4f35504e51ec112de5c384df7ba0b8d578a4c702b6bf11d5fac",
    "00000000",
);

static MAINNET_GENESIS: LazyLock<Block> =
    LazyLock::new(|| materialize(Network::Mainnet, MAINNET_GENESIS_HEX));
static TESTNET_GENESIS: LazyLock<Block> =
    LazyLock::new(|| materialize(Network::Testnet, TESTNET_GENESIS_HEX));

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Mainnet, Network::Testnet];

    pub fn genesis(self) -> &'static Block {
        match self {
            Network::Mainnet => LazyLock::force(&MAINNET_GENESIS),
            Network::Testnet => LazyLock::force(&TESTNET_GENESIS),
        }
    }

    pub fn genesis_hex(self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_GENESIS_HEX,
            Network::Testnet => TESTNET_GENESIS_HEX,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            other => Err(format!("unknown network '{other}'")),
        }
    }
}

fn materialize(network: Network, encoded: &str) -> Block {
    let genesis = Block::from_hex(encoded)
        .unwrap_or_else(|err| panic!("{network} genesis constant does not decode: {err}"));

    assert!(genesis.is_valid(), "{network} genesis block is not valid");
    assert_eq!(
        genesis.transactions.len(),
        1,
        "{network} genesis block must hold exactly one transaction"
    );
    assert_eq!(
        genesis.merkle_root(),
        genesis.header.merkle,
        "{network} genesis merkle root does not match its header"
    );

    info!(%network, size = genesis.serialized_size(), "genesis block materialized");
    genesis
}

pub fn genesis_mainnet() -> Block {
    Network::Mainnet.genesis().clone()
}

pub fn genesis_testnet() -> Block {
    Network::Testnet.genesis().clone()
}
