use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use ledger_block::{
    build_merkle_root, decode_hash, encode_hash, Block, Encodable, Hash, Network, Reader,
    StreamReader,
};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "Inspect blocks: decode, fingerprint and dump the genesis blocks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show a network's genesis block
    Genesis {
        /// Network whose genesis block to show
        #[arg(long, env = "LEDGER_NETWORK", default_value = "mainnet")]
        network: Network,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Print the raw block as hex and nothing else
        #[arg(long, conflicts_with = "json")]
        raw: bool,
    },
    /// Decode a block and report its identity and Merkle root
    Decode(DecodeArgs),
    /// Compute the Merkle root of display-order hex digests
    Merkle {
        /// Leaf digests, in order
        hashes: Vec<String>,
    },
}

#[derive(Args, Debug)]
struct DecodeArgs {
    #[command(flatten)]
    input: BlockInput,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct BlockInput {
    /// Block as a hex string
    #[arg(long)]
    hex: Option<String>,
    /// File holding the raw block bytes
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Serialize)]
struct TxSummary {
    hash: String,
    inputs: usize,
    outputs: usize,
    output_value: u64,
    coinbase: bool,
    size: u64,
}

#[derive(Serialize)]
struct BlockSummary {
    hash: String,
    version: u32,
    previous_block_hash: String,
    merkle_root: String,
    computed_merkle_root: String,
    merkle_matches: bool,
    timestamp: u32,
    bits: String,
    nonce: u32,
    valid: bool,
    size: u64,
    transaction_count: usize,
    transactions: Vec<TxSummary>,
}

impl BlockSummary {
    fn new(block: &Block) -> Self {
        let computed = block.merkle_root();
        Self {
            hash: encode_hash(&block.hash()),
            version: block.header.version,
            previous_block_hash: encode_hash(&block.header.previous_block_hash),
            merkle_root: encode_hash(&block.header.merkle),
            computed_merkle_root: encode_hash(&computed),
            merkle_matches: computed == block.header.merkle,
            timestamp: block.header.timestamp,
            bits: format!("{:08x}", block.header.bits),
            nonce: block.header.nonce,
            valid: block.is_valid(),
            size: block.serialized_size(),
            transaction_count: block.transactions.len(),
            transactions: block
                .transactions
                .iter()
                .map(|tx| TxSummary {
                    hash: encode_hash(&tx.hash()),
                    inputs: tx.inputs.len(),
                    outputs: tx.outputs.len(),
                    output_value: tx.total_output_value(),
                    coinbase: tx.is_coinbase(),
                    size: tx.serialized_size(),
                })
                .collect(),
        }
    }

    fn print_text(&self) {
        println!("hash:         {}", self.hash);
        println!("version:      {}", self.version);
        println!("previous:     {}", self.previous_block_hash);
        println!("merkle root:  {}", self.merkle_root);
        println!(
            "computed:     {} ({})",
            self.computed_merkle_root,
            if self.merkle_matches { "matches" } else { "MISMATCH" }
        );
        println!("timestamp:    {}", self.timestamp);
        println!("bits:         {}", self.bits);
        println!("nonce:        {}", self.nonce);
        println!("valid:        {}", self.valid);
        println!("size:         {} bytes", self.size);
        println!("transactions: {}", self.transaction_count);
        for (i, tx) in self.transactions.iter().enumerate() {
            println!(
                "  [{i}] {} in={} out={} value={}{}",
                tx.hash,
                tx.inputs,
                tx.outputs,
                tx.output_value,
                if tx.coinbase { " coinbase" } else { "" }
            );
        }
    }
}

fn report(block: &Block, json: bool) -> Result<()> {
    let summary = BlockSummary::new(block);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        summary.print_text();
    }
    Ok(())
}

fn decode_file(path: &Path) -> Result<Block> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut source = StreamReader::new(BufReader::new(file));
    let block = Block::decode(&mut source)
        .with_context(|| format!("decoding block from {}", path.display()))?;

    let consumed = source.position();
    let mut rest = source.into_inner();
    let mut probe = [0u8; 1];
    if rest.read(&mut probe)? > 0 {
        warn!(consumed, path = %path.display(), "file continues past the end of the block");
    }
    Ok(block)
}

fn merkle(hashes: &[String]) -> Result<Hash> {
    let leaves = hashes
        .iter()
        .enumerate()
        .map(|(i, text)| decode_hash(text).with_context(|| format!("leaf {i}")))
        .collect::<Result<Vec<_>>>()?;
    debug!(leaves = leaves.len(), "building merkle root");
    Ok(build_merkle_root(&leaves))
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Genesis { network, json, raw } => {
            let genesis = network.genesis();
            if raw {
                println!("{}", genesis.to_hex());
            } else {
                report(genesis, json)?;
            }
        }
        Command::Decode(args) => {
            let block = match (&args.input.hex, &args.input.file) {
                (Some(text), _) => Block::from_hex(text).context("decoding hex block")?,
                (None, Some(path)) => decode_file(path)?,
                (None, None) => unreachable!("clap requires one input"),
            };
            report(&block, args.json)?;
        }
        Command::Merkle { hashes } => {
            println!("{}", encode_hash(&merkle(&hashes)?));
        }
    }
    Ok(())
}
