use ledger_block::{Block, BlockHeader, Hash, OutPoint, Transaction, TxInput, TxOutput};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_hashes(rng: &mut StdRng, count: usize) -> Vec<Hash> {
    (0..count).map(|_| rng.gen()).collect()
}

pub fn random_transaction(rng: &mut StdRng) -> Transaction {
    let inputs = (0..rng.gen_range(1..4))
        .map(|_| TxInput {
            previous_output: OutPoint {
                hash: rng.gen(),
                index: rng.gen_range(0..8),
            },
            script: (0..rng.gen_range(0..120)).map(|_| rng.gen()).collect(),
            sequence: u32::MAX,
        })
        .collect();
    let outputs = (0..rng.gen_range(1..4))
        .map(|_| TxOutput {
            value: rng.gen_range(1..50_000_000),
            script: (0..rng.gen_range(20..40)).map(|_| rng.gen()).collect(),
        })
        .collect();
    Transaction {
        version: 1,
        inputs,
        outputs,
        lock_time: 0,
    }
}

/// A block whose header commits to its transactions.
pub fn random_block(rng: &mut StdRng, tx_count: usize) -> Block {
    let transactions: Vec<Transaction> = (0..tx_count).map(|_| random_transaction(rng)).collect();
    let header = BlockHeader {
        version: rng.gen_range(1..4),
        previous_block_hash: rng.gen(),
        merkle: Block::generate_merkle_root(&transactions),
        timestamp: rng.gen(),
        bits: 0x1d00ffff,
        nonce: rng.gen(),
        transaction_count: 0,
    };
    Block::new(header, transactions)
}
