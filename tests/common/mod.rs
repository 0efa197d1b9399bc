//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get a sit command pointed at the test data dir
///
/// The credential variable is always scrubbed so import tests exercise the
/// demo fallback deterministically regardless of the host environment.
pub fn sit(tmp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("sit"));
    cmd.env("SIT_DATA_DIR", tmp.path());
    cmd.env_remove("API_KEY");
    cmd
}

/// Helper to create a test data dir with an active admin session
pub fn setup() -> TempDir {
    let tmp = TempDir::new().unwrap();
    sit(&tmp)
        .args(["login", "--username", "admin", "--password", "123"])
        .assert()
        .success();
    tmp
}

/// Helper to set absolute stock quantities
pub fn stock_set(tmp: &TempDir, pairs: &[&str]) {
    let mut args = vec!["stock", "set"];
    args.extend_from_slice(pairs);
    sit(tmp).args(&args).assert().success();
}

/// Helper to create a report, returning the printed (short) id
pub fn create_report(tmp: &TempDir, status: &str, items: &[&str]) -> String {
    let mut args = vec![
        "report",
        "new",
        "--requester",
        "Sok Dara",
        "--campus",
        "Campus1",
        "--import-date",
        "2026-03-01",
        "--export-date",
        "2026-03-02",
        "--status",
        status,
    ];
    for item in items {
        args.push("--item");
        args.push(item);
    }

    let output = sit(tmp).args(&args).output().unwrap();
    assert!(
        output.status.success(),
        "report new failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .find(|line| line.contains("RPT-"))
        .and_then(|line| line.split_whitespace().find(|word| word.starts_with("RPT-")))
        .map(|word| word.trim_end_matches("...").to_string())
        .unwrap_or_default()
}

/// Read the persisted quantity for an item straight from device storage
pub fn stock_quantity(tmp: &TempDir, item: &str) -> i64 {
    let raw = std::fs::read_to_string(tmp.path().join("stock.json")).unwrap();
    let stock: serde_json::Value = serde_json::from_str(&raw).unwrap();
    stock[item]["quantity"].as_i64().unwrap()
}

/// Read the persisted reports document
pub fn persisted_reports(tmp: &TempDir) -> Vec<serde_json::Value> {
    let raw = std::fs::read_to_string(tmp.path().join("reports.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}
