//! Document import and printable export tests

mod common;

use common::{create_report, persisted_reports, setup, sit, stock_quantity, stock_set};
use predicates::prelude::*;

fn write_document(tmp: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
    let path = tmp.path().join("requisitions.txt");
    std::fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// Import
// ============================================================================

#[test]
fn test_import_without_credential_loads_demo_data() {
    let tmp = setup();
    let doc = write_document(&tmp, "some scanned requisition text");

    sit(&tmp)
        .args(["import"])
        .arg(&doc)
        .assert()
        .success()
        .stdout(predicate::str::contains("Demo mode"))
        .stdout(predicate::str::contains("2 report(s)"));

    let reports = persisted_reports(&tmp);
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["requesterName"], "John Doe (Demo)");
    assert_eq!(stock_quantity(&tmp, "A4 Paper"), 18);
    assert_eq!(stock_quantity(&tmp, "Bk"), 20);
}

#[test]
fn test_import_replaces_existing_state_entirely() {
    let tmp = setup();
    stock_set(&tmp, &["Stapler=40"]);
    create_report(&tmp, "process", &["Stapler=2"]);

    let doc = write_document(&tmp, "text");
    sit(&tmp).args(["import"]).arg(&doc).assert().success();

    // The old report and the old stock levels are gone, not merged.
    let reports = persisted_reports(&tmp);
    assert_eq!(reports.len(), 2);
    assert!(reports
        .iter()
        .all(|report| report["requesterName"] != "Sok Dara"));
    assert_eq!(stock_quantity(&tmp, "Stapler"), 0);
}

#[test]
fn test_import_clears_the_selection() {
    let tmp = setup();
    let id = create_report(&tmp, "process", &["Mouse=1"]);
    sit(&tmp).args(["report", "select", id.as_str()]).assert().success();

    let doc = write_document(&tmp, "text");
    sit(&tmp).args(["import"]).arg(&doc).assert().success();

    sit(&tmp)
        .args(["report", "selected"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No report selected."));
}

#[test]
fn test_blank_document_aborts_with_no_state_change() {
    let tmp = setup();
    stock_set(&tmp, &["Mouse=5"]);
    let doc = write_document(&tmp, "   \n  ");

    // With a credential configured, extraction runs first and fails before
    // any service call or state change.
    sit(&tmp)
        .env("API_KEY", "test-key")
        .args(["import"])
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no text could be extracted"));

    assert_eq!(stock_quantity(&tmp, "Mouse"), 5);
}

#[test]
fn test_import_requires_a_session() {
    let tmp = tempfile::TempDir::new().unwrap();
    let doc = write_document(&tmp, "text");

    sit(&tmp)
        .args(["import"])
        .arg(&doc)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn test_export_full_writes_a_dated_document() {
    let tmp = setup();
    stock_set(&tmp, &["A4 Paper=10"]);
    create_report(&tmp, "done", &["A4 Paper=2"]);

    let out = tmp.path().join("exports");
    sit(&tmp)
        .args(["export", "full", "-o"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    let today = chrono::Local::now().date_naive();
    let path = out.join(format!("Stationary_Full_Report_{today}.txt"));
    let doc = std::fs::read_to_string(&path).unwrap();
    assert!(doc.contains("Status: Done"));
    assert!(doc.contains("Sok Dara"));
    assert!(doc.contains("Current Stock Inventory"));
}

#[test]
fn test_export_stock_csv() {
    let tmp = setup();
    stock_set(&tmp, &["Mouse=9"]);

    let out = tmp.path().join("exports");
    sit(&tmp)
        .args(["export", "stock", "--format", "csv", "-o"])
        .arg(&out)
        .assert()
        .success();

    let today = chrono::Local::now().date_naive();
    let path = out.join(format!("Stock_Inventory_Report_{today}.csv"));
    let mut reader = csv::Reader::from_path(&path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();

    let mouse = rows.iter().find(|row| &row[0] == "Mouse").unwrap();
    assert_eq!(&mouse[1], "9");
    assert_eq!(&mouse[3], "N/A");
}
