//! Normalization of external payloads into replacement state
//!
//! Import is a total replacement, never a merge. Incoming report records
//! that lack a requester, campus, or import date are dropped entirely;
//! stock history fields reset because an import cannot know past
//! transactions.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_embed::Embed;

use crate::core::catalog::Catalog;
use crate::core::ledger::{StockItem, StockLedger};
use crate::core::report::{ItemMap, Report, ReportId, ReportStatus};
use crate::import::payload::{ImportPayload, ImportedReport};
use crate::import::ImportError;

#[derive(Embed)]
#[folder = "data/"]
struct EmbeddedData;

const DEMO_PAYLOAD: &str = "demo_import.json";

/// A full replacement for the report store and stock ledger
#[derive(Debug, Clone)]
pub struct Replacement {
    pub reports: Vec<Report>,
    pub ledger: StockLedger,
}

/// Normalize a validated payload against the catalog
pub fn replacement(payload: ImportPayload, catalog: &Catalog) -> Replacement {
    let reports = payload
        .reports
        .into_iter()
        .filter_map(normalize_report)
        .collect();

    // One entry per catalog item; records for unknown items are inert.
    let mut items: BTreeMap<String, StockItem> = catalog
        .items()
        .map(|item| (item.to_string(), StockItem::default()))
        .collect();
    for record in payload.stock {
        let Some(slot) = items.get_mut(&record.name) else {
            continue;
        };
        *slot = StockItem {
            quantity: record.quantity,
            last_in_date: normalize_stock_date(&record.last_in_date),
            ..Default::default()
        };
    }

    Replacement {
        reports,
        ledger: StockLedger::from_items(items),
    }
}

fn normalize_report(record: ImportedReport) -> Option<Report> {
    if record.requester_name.trim().is_empty()
        || record.campus.trim().is_empty()
        || record.import_date.trim().is_empty()
    {
        return None;
    }

    let mut items = ItemMap::new();
    for entry in record.items {
        if entry.quantity > 0 {
            items.insert(entry.name, entry.quantity.min(u32::MAX as i64) as u32);
        }
    }

    let status = if record.status == "Done" {
        ReportStatus::Done
    } else {
        ReportStatus::Process
    };

    Some(Report {
        id: ReportId::generate(),
        requester_name: record.requester_name,
        campus: record.campus,
        import_date: record.import_date,
        export_date: record.export_date,
        items,
        status,
    })
}

fn normalize_stock_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "N/A" {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// The embedded demo payload, normalized the same way a service payload is
pub fn demo_replacement(catalog: &Catalog) -> Result<Replacement, ImportError> {
    let file = EmbeddedData::get(DEMO_PAYLOAD).ok_or(ImportError::MissingAsset(DEMO_PAYLOAD))?;
    let payload = crate::import::payload::validate(
        serde_json::from_slice(&file.data)
            .map_err(|err| ImportError::Parse(format!("demo payload is not JSON: {err}")))?,
    )?;
    Ok(replacement(payload, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::payload::validate;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> ImportPayload {
        validate(value).unwrap()
    }

    #[test]
    fn test_incomplete_report_records_are_dropped() {
        let result = replacement(
            payload(json!({
                "reports": [
                    {"requesterName": "", "campus": "Campus1", "importDate": "2026-01-01"},
                    {"requesterName": "Kept", "campus": "Campus1", "importDate": "2026-01-01",
                     "exportDate": "2026-01-02",
                     "items": [{"name": "Mouse", "quantity": 1}], "status": "Done"},
                    {"requesterName": "No Date", "campus": "Campus1", "importDate": ""}
                ],
                "stock": []
            })),
            &Catalog::default(),
        );

        assert_eq!(result.reports.len(), 1);
        assert_eq!(result.reports[0].requester_name, "Kept");
        assert_eq!(result.reports[0].status, ReportStatus::Done);
    }

    #[test]
    fn test_status_defaults_to_process_unless_exactly_done() {
        let result = replacement(
            payload(json!({
                "reports": [
                    {"requesterName": "A", "campus": "C", "importDate": "2026-01-01",
                     "status": "done"},
                    {"requesterName": "B", "campus": "C", "importDate": "2026-01-01",
                     "status": "DONE"}
                ],
                "stock": []
            })),
            &Catalog::default(),
        );

        assert!(result
            .reports
            .iter()
            .all(|report| report.status == ReportStatus::Process));
    }

    #[test]
    fn test_item_lists_become_maps_without_nonpositive_entries() {
        let result = replacement(
            payload(json!({
                "reports": [{
                    "requesterName": "A", "campus": "C", "importDate": "2026-01-01",
                    "items": [
                        {"name": "Mouse", "quantity": 2},
                        {"name": "Bk", "quantity": 0},
                        {"name": "Webcam", "quantity": -4}
                    ]
                }],
                "stock": []
            })),
            &Catalog::default(),
        );

        assert_eq!(result.reports[0].items.len(), 1);
        assert_eq!(result.reports[0].items.get("Mouse"), Some(&2));
    }

    #[test]
    fn test_every_import_gets_a_fresh_id() {
        let record = json!({
            "reports": [
                {"requesterName": "A", "campus": "C", "importDate": "2026-01-01"},
                {"requesterName": "B", "campus": "C", "importDate": "2026-01-01"}
            ],
            "stock": []
        });
        let result = replacement(payload(record), &Catalog::default());
        assert_ne!(result.reports[0].id, result.reports[1].id);
    }

    #[test]
    fn test_stock_records_reset_history_fields() {
        let result = replacement(
            payload(json!({
                "reports": [],
                "stock": [
                    {"name": "A4 Paper", "quantity": 18, "lastInDate": "2026-01-10"},
                    {"name": "Mouse", "quantity": 9, "lastInDate": "N/A"},
                    {"name": "Keyboard", "quantity": 14}
                ]
            })),
            &Catalog::default(),
        );

        let paper = result.ledger.get("A4 Paper").unwrap();
        assert_eq!(paper.quantity, 18);
        assert_eq!(paper.last_in_date.unwrap().to_string(), "2026-01-10");
        assert_eq!(paper.last_out_date, None);
        assert_eq!(paper.last_update_quantity, 0);

        assert_eq!(result.ledger.get("Mouse").unwrap().last_in_date, None);
        assert_eq!(result.ledger.get("Keyboard").unwrap().last_in_date, None);
    }

    #[test]
    fn test_ledger_carries_the_whole_catalog_and_nothing_else() {
        let catalog = Catalog::default();
        let result = replacement(
            payload(json!({
                "reports": [],
                "stock": [
                    {"name": "Mouse", "quantity": 9},
                    {"name": "Typewriter", "quantity": 3}
                ]
            })),
            &catalog,
        );

        assert_eq!(result.ledger.len(), catalog.len());
        assert_eq!(result.ledger.quantity("Mouse"), 9);
        assert_eq!(result.ledger.quantity("A4 Paper"), 0);
        assert!(result.ledger.get("Typewriter").is_none());
    }

    #[test]
    fn test_demo_payload_is_valid_and_internally_consistent() {
        let catalog = Catalog::default();
        let demo = demo_replacement(&catalog).unwrap();

        assert_eq!(demo.reports.len(), 2);
        assert!(demo
            .reports
            .iter()
            .any(|report| report.status == ReportStatus::Done));
        assert_eq!(demo.ledger.len(), catalog.len());
        assert!(demo.ledger.quantity("A4 Paper") > 0);
    }
}
