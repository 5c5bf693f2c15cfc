//! End-to-end tests for the `cq` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PRICE_CSV: &str = "\
Width/Type (mm),S TRACK TYPE 1 PRICE,S TRACK TYPE 2 PRICE,S TRACK TYPE 3 PRICE
1500,30,31,32
500,10,11,12
1000,20,21,22
";

/// A `cq` command isolated from any `.env` or price table in the environment.
fn cq(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cq").unwrap();
    cmd.current_dir(dir.path()).env_remove("CQ_PRICE_TABLE").env_remove("RUST_LOG");
    cmd
}

fn write_price_table(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("prices.csv");
    fs::write(&path, PRICE_CSV).unwrap();
    path
}

#[test]
fn curtain_prints_quantities() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["curtain", "--width", "3000", "--drop", "2140", "--type", "drape_on_strack"])
        .assert()
        .success()
        .stdout(predicate::str::contains("making       5 m"))
        .stdout(predicate::str::contains("lining       13 m"));
}

#[test]
fn curtain_json_output() {
    let tmp = TempDir::new().unwrap();
    let output = cq(&tmp)
        .args(["curtain", "--width", "2000", "--drop", "2700", "--type", "sheer_on_strack", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["curtainType"], "sheer_on_strack");
    assert_eq!(value["result"]["making"], 4.4);
    assert_eq!(value["result"]["track"], 2.0);
    assert!(value["result"].get("lining").is_none());
}

#[test]
fn curtain_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("curtain.json");
    fs::write(
        &config,
        r#"{ "width": "2000", "drop": 2700, "curtainType": "drape_on_silon_track" }"#,
    )
    .unwrap();

    cq(&tmp)
        .args(["curtain", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("fabric       21 m"));
}

#[test]
fn unknown_curtain_type_fails_with_input_error() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["curtain", "--width", "2000", "--drop", "2700", "--type", "roller_blind"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown curtainType: roller_blind"));
}

#[test]
fn non_numeric_width_fails() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["curtain", "--width", "wide", "--drop", "2700", "--type", "sheer_on_strack"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a valid number"));
}

#[test]
fn price_from_table_file() {
    let tmp = TempDir::new().unwrap();
    let table = write_price_table(&tmp);
    cq(&tmp)
        .args(["price", "--track-width", "1200", "--table"])
        .arg(&table)
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected width: 1500 mm"))
        .stdout(predicate::str::contains("Track price:    $30.00"));
}

#[test]
fn price_falls_back_to_widest() {
    let tmp = TempDir::new().unwrap();
    let table = write_price_table(&tmp);
    cq(&tmp)
        .args(["price", "--track-width", "2000", "--type-number", "2", "--table"])
        .arg(&table)
        .assert()
        .success()
        .stdout(predicate::str::contains("1500 mm (widest available)"))
        .stdout(predicate::str::contains("$31.00"));
}

#[test]
fn price_table_from_environment() {
    let tmp = TempDir::new().unwrap();
    let table = write_price_table(&tmp);
    cq(&tmp)
        .env("CQ_PRICE_TABLE", &table)
        .args(["price", "--track-width", "700", "--column", "S TRACK TYPE 3 PRICE", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"trackPriceDisplay\": \"$22.00\""));
}

#[test]
fn price_missing_named_column() {
    let tmp = TempDir::new().unwrap();
    let table = write_price_table(&tmp);
    cq(&tmp)
        .args(["price", "--track-width", "700", "--column", "MOTOR", "--catalog", "motorized", "--table"])
        .arg(&table)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Motorized track type 'MOTOR' not found in headers"));
}

#[test]
fn price_with_no_valid_rows_exits_3() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .args(["price", "--track-width", "700", "--headers", "Width,Type 1", "--rows", "abc,def\nxyz"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No valid pricing options"));
}

#[test]
fn price_from_config_with_json_encoded_rows() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("price.json");
    fs::write(
        &config,
        r#"{
            "trackWidth": "1200",
            "csvHeaders": ["[\"Width/Type (mm)\",\"Type 1\",\"Type 2\",\"Type 3\"]"],
            "csvDataRows": ["[[\"Width/Type (mm)\",\"Type 1\",\"Type 2\",\"Type 3\"],[\"500\",\"10\",\"11\",\"12\"],[\"1500\",\"30\",\"31\",\"32\"]]"],
            "selectedTrackTypeNumber": 99
        }"#,
    )
    .unwrap();

    cq(&tmp)
        .args(["price", "--json", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"selectedTrackWidth\": 1500.0"))
        .stdout(predicate::str::contains("\"trackPrice\": 32.0"));
}

#[test]
fn samples_run_every_type() {
    let tmp = TempDir::new().unwrap();
    cq(&tmp)
        .arg("samples")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Sheer on S Track (2000mm x 2700mm) ---"))
        .stdout(predicate::str::contains("--- Sheer on Silon Track or Rod (2000mm x 2700mm) ---"));
}
