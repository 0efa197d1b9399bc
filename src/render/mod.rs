//! Printable document rendering
//!
//! Renders reports (grouped by status, with item-count summaries) and the
//! stock ledger to files named with today's date. The text renderer lays
//! tables out with `tabled`; the CSV renderer writes the same rows for
//! spreadsheet use.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use tabled::builder::Builder;
use tabled::settings::Style;
use thiserror::Error;

use crate::core::ledger::StockLedger;
use crate::core::report::{Report, ReportStatus};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("there is no report or stock data to export")]
    NoData,

    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Renders tabular report/stock data to a saved printable file
pub trait DocumentRenderer {
    /// Reports grouped by status plus the current stock table
    fn render_full(
        &self,
        reports: &[Report],
        ledger: &StockLedger,
        today: NaiveDate,
    ) -> Result<PathBuf, RenderError>;

    /// The stock table alone
    fn render_stock(&self, ledger: &StockLedger, today: NaiveDate)
        -> Result<PathBuf, RenderError>;
}

/// Total quantity per item across the given reports
pub fn item_counts(reports: &[Report]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for report in reports {
        for (item, quantity) in &report.items {
            *counts.entry(item.clone()).or_insert(0) += u64::from(*quantity);
        }
    }
    counts
}

/// "A4 Paper (2), Mouse (1)" for a report's item map
pub fn format_items(report: &Report) -> String {
    if report.items.is_empty() {
        return "N/A".to_string();
    }
    report
        .items
        .iter()
        .map(|(item, quantity)| format!("{item} ({quantity})"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn summary_line(counts: &BTreeMap<String, u64>) -> String {
    counts
        .iter()
        .map(|(item, count)| format!("{item}: {count}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

fn reports_table(reports: &[Report]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Requester", "Campus", "Import", "Export", "Total"]);
    for report in reports {
        builder.push_record([
            report.requester_name.clone(),
            report.campus.clone(),
            report.import_date.clone(),
            report.export_date.clone(),
            report.total_items().to_string(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::ascii());
    table.to_string()
}

fn stock_table(ledger: &StockLedger) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Item", "Quantity in Stock", "Last Date In", "Last Date Out"]);
    for (item, entry) in ledger.iter() {
        builder.push_record([
            item.clone(),
            entry.quantity.to_string(),
            entry
                .last_in_date
                .map_or_else(|| "N/A".to_string(), |date| date.to_string()),
            entry
                .last_out_date
                .map_or_else(|| "N/A".to_string(), |date| date.to_string()),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::ascii());
    table.to_string()
}

/// Plain-text printable documents
pub struct TextRenderer {
    out_dir: PathBuf,
}

impl TextRenderer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(file_name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}

impl DocumentRenderer for TextRenderer {
    fn render_full(
        &self,
        reports: &[Report],
        ledger: &StockLedger,
        today: NaiveDate,
    ) -> Result<PathBuf, RenderError> {
        if reports.is_empty() && ledger.is_empty() {
            return Err(RenderError::NoData);
        }

        let done: Vec<Report> = reports
            .iter()
            .filter(|report| report.status == ReportStatus::Done)
            .cloned()
            .collect();
        let process: Vec<Report> = reports
            .iter()
            .filter(|report| report.status == ReportStatus::Process)
            .cloned()
            .collect();

        let mut doc = String::new();
        doc.push_str("Stationary Report (All Time, All Campuses)\n");
        doc.push_str(&format!("Generated on: {today}\n\n"));

        let overall = item_counts(reports);
        if !overall.is_empty() {
            doc.push_str("Overall Summary\n");
            doc.push_str(&summary_line(&overall));
            doc.push_str("\n\n");
        }

        for (title, group) in [("Status: Done", &done), ("Status: Process", &process)] {
            if group.is_empty() {
                continue;
            }
            doc.push_str(title);
            doc.push('\n');
            doc.push_str("Summary (Total Items)\n");
            doc.push_str(&summary_line(&item_counts(group)));
            doc.push('\n');
            doc.push_str(&reports_table(group));
            doc.push_str("\n\n");
        }

        doc.push_str("Current Stock Inventory\n");
        doc.push_str(&stock_table(ledger));
        doc.push('\n');

        self.save(&format!("Stationary_Full_Report_{today}.txt"), &doc)
    }

    fn render_stock(
        &self,
        ledger: &StockLedger,
        today: NaiveDate,
    ) -> Result<PathBuf, RenderError> {
        if ledger.is_empty() {
            return Err(RenderError::NoData);
        }
        let mut doc = String::new();
        doc.push_str("Stock Inventory Report\n");
        doc.push_str(&format!("Generated on: {today}\n\n"));
        doc.push_str(&stock_table(ledger));
        doc.push('\n');

        self.save(&format!("Stock_Inventory_Report_{today}.txt"), &doc)
    }
}

/// The same tables as CSV rows
pub struct CsvRenderer {
    out_dir: PathBuf,
}

impl CsvRenderer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    fn prepare(&self, file_name: &str) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(&self.out_dir)?;
        Ok(self.out_dir.join(file_name))
    }
}

impl DocumentRenderer for CsvRenderer {
    fn render_full(
        &self,
        reports: &[Report],
        ledger: &StockLedger,
        today: NaiveDate,
    ) -> Result<PathBuf, RenderError> {
        if reports.is_empty() && ledger.is_empty() {
            return Err(RenderError::NoData);
        }
        let path = self.prepare(&format!("Stationary_Full_Report_{today}.csv"))?;
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record([
            "Requester",
            "Campus",
            "Import Date",
            "Export Date",
            "Items",
            "Total",
            "Status",
        ])?;
        for report in reports {
            writer.write_record([
                report.requester_name.clone(),
                report.campus.clone(),
                report.import_date.clone(),
                report.export_date.clone(),
                format_items(report),
                report.total_items().to_string(),
                report.status.to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(path)
    }

    fn render_stock(
        &self,
        ledger: &StockLedger,
        today: NaiveDate,
    ) -> Result<PathBuf, RenderError> {
        if ledger.is_empty() {
            return Err(RenderError::NoData);
        }
        let path = self.prepare(&format!("Stock_Inventory_Report_{today}.csv"))?;
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["Item", "Quantity", "Last Date In", "Last Date Out"])?;
        for (item, entry) in ledger.iter() {
            writer.write_record([
                item.clone(),
                entry.quantity.to_string(),
                entry
                    .last_in_date
                    .map_or_else(|| "N/A".to_string(), |date| date.to_string()),
                entry
                    .last_out_date
                    .map_or_else(|| "N/A".to_string(), |date| date.to_string()),
            ])?;
        }
        writer.flush()?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use crate::core::report::{ReportDraft, ReportId};
    use tempfile::tempdir;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn report(requester: &str, status: ReportStatus, items: &[(&str, u32)]) -> Report {
        let mut draft = ReportDraft {
            requester_name: requester.to_string(),
            campus: "Campus1".to_string(),
            import_date: "2026-06-01".to_string(),
            export_date: "2026-06-02".to_string(),
            status,
            ..Default::default()
        };
        for (item, quantity) in items {
            draft.set_item(item, *quantity);
        }
        draft.into_report(ReportId::generate())
    }

    #[test]
    fn test_item_counts_sums_across_reports() {
        let reports = vec![
            report("A", ReportStatus::Done, &[("Mouse", 2), ("Bk", 1)]),
            report("B", ReportStatus::Process, &[("Mouse", 3)]),
        ];
        let counts = item_counts(&reports);
        assert_eq!(counts.get("Mouse"), Some(&5));
        assert_eq!(counts.get("Bk"), Some(&1));
    }

    #[test]
    fn test_full_document_groups_by_status() {
        let tmp = tempdir().unwrap();
        let renderer = TextRenderer::new(tmp.path());
        let reports = vec![
            report("Done Person", ReportStatus::Done, &[("Mouse", 1)]),
            report("Pending Person", ReportStatus::Process, &[("Bk", 2)]),
        ];
        let ledger = StockLedger::for_catalog(&Catalog::default());

        let path = renderer
            .render_full(&reports, &ledger, day("2026-06-03"))
            .unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .contains("2026-06-03"));

        let doc = fs::read_to_string(&path).unwrap();
        assert!(doc.contains("Status: Done"));
        assert!(doc.contains("Status: Process"));
        assert!(doc.contains("Done Person"));
        assert!(doc.contains("Overall Summary"));
        assert!(doc.contains("Current Stock Inventory"));
    }

    #[test]
    fn test_stock_document_shows_na_for_missing_dates() {
        let tmp = tempdir().unwrap();
        let renderer = TextRenderer::new(tmp.path());
        let ledger = StockLedger::for_catalog(&Catalog::default());

        let path = renderer.render_stock(&ledger, day("2026-06-03")).unwrap();
        let doc = fs::read_to_string(&path).unwrap();
        assert!(doc.contains("N/A"));
        assert!(doc.contains("A4 Paper"));
    }

    #[test]
    fn test_csv_export_round_trips_through_a_reader() {
        let tmp = tempdir().unwrap();
        let renderer = CsvRenderer::new(tmp.path());
        let reports = vec![report(
            "Comma, Name",
            ReportStatus::Done,
            &[("Mouse", 2)],
        )];
        let ledger = StockLedger::for_catalog(&Catalog::default());

        let path = renderer
            .render_full(&reports, &ledger, day("2026-06-04"))
            .unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "Comma, Name");
        assert_eq!(&rows[0][6], "Done");
    }

    #[test]
    fn test_empty_state_is_reported_not_rendered() {
        let tmp = tempdir().unwrap();
        let renderer = TextRenderer::new(tmp.path());
        let empty = StockLedger::from_items(Default::default());

        assert!(matches!(
            renderer.render_full(&[], &empty, day("2026-06-05")),
            Err(RenderError::NoData)
        ));
        assert!(matches!(
            renderer.render_stock(&empty, day("2026-06-05")),
            Err(RenderError::NoData)
        ));
    }
}
