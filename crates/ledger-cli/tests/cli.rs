use assert_cmd::Command;
use ledger_block::Network;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const MAINNET_HASH: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
const TESTNET_HASH: &str = "000000000933ea01ad0ee984209779baaec3ced90fa3f408719526f8d77f4943";
const GENESIS_MERKLE: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("ledger-cli").expect("binary built");
    cmd.env_remove("LEDGER_NETWORK");
    cmd
}

#[test]
fn genesis_defaults_to_mainnet() {
    cli()
        .arg("genesis")
        .assert()
        .success()
        .stdout(predicate::str::contains(MAINNET_HASH))
        .stdout(predicate::str::contains("matches"));
}

#[test]
fn genesis_network_from_flag_and_env() {
    cli()
        .args(["genesis", "--network", "testnet"])
        .assert()
        .success()
        .stdout(predicate::str::contains(TESTNET_HASH));

    cli()
        .env("LEDGER_NETWORK", "testnet")
        .arg("genesis")
        .assert()
        .success()
        .stdout(predicate::str::contains(TESTNET_HASH));
}

#[test]
fn genesis_raw_prints_the_constant() {
    cli()
        .args(["genesis", "--raw"])
        .assert()
        .success()
        .stdout(format!("{}\n", Network::Mainnet.genesis_hex()));
}

#[test]
fn genesis_json_is_parseable() {
    let output = cli().args(["genesis", "--json"]).output().unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["hash"], MAINNET_HASH);
    assert_eq!(value["merkle_root"], GENESIS_MERKLE);
    assert_eq!(value["merkle_matches"], true);
    assert_eq!(value["transaction_count"], 1);
    assert_eq!(value["size"], 285);
}

#[test]
fn decode_hex_and_file_agree() -> anyhow::Result<()> {
    let hex = Network::Testnet.genesis_hex();
    cli()
        .args(["decode", "--hex", hex])
        .assert()
        .success()
        .stdout(predicate::str::contains(TESTNET_HASH));

    let dir = tempdir()?;
    let path = dir.path().join("genesis.bin");
    fs::write(&path, hex::decode(hex)?)?;
    cli()
        .args(["decode", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(TESTNET_HASH));
    Ok(())
}

#[test]
fn decode_truncated_input_fails() {
    let hex = Network::Mainnet.genesis_hex();
    cli()
        .args(["decode", "--hex", &hex[..hex.len() - 2]])
        .assert()
        .failure()
        .stderr(predicate::str::contains("short read"));
}

#[test]
fn decode_requires_exactly_one_input() {
    cli().arg("decode").assert().failure();
    cli()
        .args(["decode", "--hex", "00", "--file", "block.bin"])
        .assert()
        .failure();
}

#[test]
fn merkle_of_single_leaf_is_the_leaf() {
    cli()
        .args(["merkle", GENESIS_MERKLE])
        .assert()
        .success()
        .stdout(format!("{GENESIS_MERKLE}\n"));
}

#[test]
fn merkle_rejects_bad_digest() {
    cli()
        .args(["merkle", "not-a-hash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("leaf 0"));
}
