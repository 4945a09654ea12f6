//! End-to-end tests for the Filter binary

use assert_cmd::Command;
use gensat_common::logging::ENV_LOG_LEVEL;
use gensat_input::cli::{ENV_INPUT_FILE, ENV_OUTPUT_FILE};
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to write a GENSAT export into a temp dir
fn write_export(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("gensat_export.txt");
    fs::write(&path, content).expect("Failed to write test export");
    path
}

fn parse_cmd() -> Command {
    let mut cmd = Command::cargo_bin("parse-gensat-entrez").unwrap();
    cmd.env_remove(ENV_INPUT_FILE)
        .env_remove(ENV_OUTPUT_FILE)
        .env_remove(ENV_LOG_LEVEL);
    cmd
}

#[test]
fn test_filter_example_export() {
    let dir = TempDir::new().unwrap();
    let input = write_export(&dir, "a\tb\tMGI:123\nx\ty\tEntrezGeneID\np\tq\t456\n");
    let output = dir.path().join("gensat.input");

    parse_cmd()
        .env(ENV_INPUT_FILE, &input)
        .env(ENV_OUTPUT_FILE, &output)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), "MGI:123\n456\n");
}

#[test]
fn test_filter_skips_short_rows_and_trims() {
    let dir = TempDir::new().unwrap();
    let input = write_export(
        &dir,
        "Symbol\tName\tEntrezGeneID\tGENSAT\r\n\
         Actb\tactin, beta\t 11461 \tY\r\n\
         orphan line without tabs\r\n\
         Gfap\tglial fibrillary acidic protein\t14580\tY\r\n",
    );
    let output = dir.path().join("gensat.input");

    parse_cmd()
        .arg("--input-file")
        .arg(&input)
        .arg("--output-file")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&output).unwrap(), "11461\n14580\n");
}

#[test]
fn test_filter_missing_input_exits_one() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("no_such_export.txt");
    let output = dir.path().join("gensat.input");

    parse_cmd()
        .env(ENV_INPUT_FILE, &input)
        .env(ENV_OUTPUT_FILE, &output)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(format!(
            "Cannot open input file: {}",
            input.display()
        )));

    assert!(!output.exists());
}

#[test]
fn test_filter_unwritable_output_exits_one() {
    let dir = TempDir::new().unwrap();
    let input = write_export(&dir, "a\tb\t1\n");
    let output = dir.path().join("missing").join("gensat.input");

    parse_cmd()
        .env(ENV_INPUT_FILE, &input)
        .env(ENV_OUTPUT_FILE, &output)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(format!(
            "Cannot open output file: {}",
            output.display()
        )));
}

#[test]
fn test_filter_missing_configuration_is_usage_error() {
    parse_cmd().assert().failure().code(2);
}

#[test]
fn test_filter_keeps_latin1_bytes() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("gensat_export.txt");
    fs::write(&input, b"Symbol\tName\tEntrezGeneID\nGn\tprot\xe9ine\tG\xe9n\n").unwrap();
    let output = dir.path().join("gensat.input");

    parse_cmd()
        .env(ENV_INPUT_FILE, &input)
        .env(ENV_OUTPUT_FILE, &output)
        .assert()
        .success();

    assert_eq!(fs::read(&output).unwrap(), b"G\xe9n\n".to_vec());
}

#[test]
fn test_filter_reports_invalid_log_level_and_continues() {
    let dir = TempDir::new().unwrap();
    let input = write_export(&dir, "a\tb\t11287\n");
    let output = dir.path().join("gensat.input");

    parse_cmd()
        .env(ENV_INPUT_FILE, &input)
        .env(ENV_OUTPUT_FILE, &output)
        .env(ENV_LOG_LEVEL, "chatty")
        .assert()
        .success()
        .stderr(predicate::str::contains("Ignoring logging configuration"));

    assert_eq!(fs::read_to_string(&output).unwrap(), "11287\n");
}
