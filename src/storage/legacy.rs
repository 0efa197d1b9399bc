//! Migration of previously persisted data across schema generations
//!
//! Stock entries have shipped in three shapes: a bare number, an object
//! with `quantity` and `dateAdded`, and the current shape. Each shape is
//! recognized by an explicit field-presence check and converted by its own
//! migration function. Reports once stored `items` as a plain list of item
//! names; repeated names now become counted quantities.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde_json::Value;

use crate::core::catalog::Catalog;
use crate::core::ledger::{StockItem, StockLedger};
use crate::core::report::{ItemMap, Report, ReportId, ReportStatus};
use crate::storage::{keys, load_json, KvStore};

/// The historical shapes a persisted stock entry can take
#[derive(Debug, Clone, PartialEq)]
enum LegacyStockRecord {
    /// Oldest shape: the quantity alone
    Bare(i64),
    /// Middle shape: quantity plus a single acquisition date
    DateAdded {
        quantity: i64,
        date_added: Option<NaiveDate>,
    },
    /// The shape written today
    Current(StockItem),
    /// Anything unrecognizable starts over from zero
    Invalid,
}

impl LegacyStockRecord {
    /// Discriminate by field presence
    fn classify(value: &Value) -> Self {
        if let Some(quantity) = value.as_i64() {
            return Self::Bare(quantity);
        }
        let Some(object) = value.as_object() else {
            return Self::Invalid;
        };
        if object.contains_key("dateAdded") {
            return Self::DateAdded {
                quantity: object.get("quantity").and_then(Value::as_i64).unwrap_or(0),
                date_added: object
                    .get("dateAdded")
                    .and_then(Value::as_str)
                    .and_then(|raw| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()),
            };
        }
        if object.contains_key("quantity") && object.contains_key("lastInDate") {
            return serde_json::from_value::<StockItem>(value.clone())
                .map_or(Self::Invalid, Self::Current);
        }
        Self::Invalid
    }

    fn migrate(self, today: NaiveDate) -> StockItem {
        match self {
            Self::Bare(quantity) => StockItem {
                quantity,
                last_in_date: Some(today),
                ..Default::default()
            },
            Self::DateAdded {
                quantity,
                date_added,
            } => StockItem {
                quantity,
                last_in_date: date_added.or(Some(today)),
                ..Default::default()
            },
            Self::Current(item) => item,
            Self::Invalid => StockItem::default(),
        }
    }
}

/// Load the stock ledger, migrating legacy entries
///
/// The result carries exactly one entry per catalog item: persisted entries
/// for items no longer in the catalog are dropped, catalog items without a
/// persisted entry start at zero.
pub fn load_stock(store: &dyn KvStore, catalog: &Catalog, today: NaiveDate) -> StockLedger {
    let saved: serde_json::Map<String, Value> =
        load_json(store, keys::STOCK).unwrap_or_default();

    let mut items = BTreeMap::new();
    for name in catalog.items() {
        let entry = saved
            .get(name)
            .map(|value| LegacyStockRecord::classify(value).migrate(today))
            .unwrap_or_default();
        items.insert(name.to_string(), entry);
    }
    StockLedger::from_items(items)
}

/// Convert an `items` value from either schema generation into the item map
fn migrate_items(value: Option<&Value>) -> ItemMap {
    let mut items = ItemMap::new();
    match value {
        Some(Value::Array(names)) => {
            // Pre-quantity schema: each occurrence of a name counts once.
            for name in names.iter().filter_map(Value::as_str) {
                *items.entry(name.to_string()).or_insert(0) += 1;
            }
        }
        Some(Value::Object(map)) => {
            for (name, quantity) in map {
                let quantity = quantity.as_i64().unwrap_or(0);
                if quantity > 0 {
                    items.insert(name.clone(), quantity.min(u32::MAX as i64) as u32);
                }
            }
        }
        _ => {}
    }
    items
}

fn migrate_report(value: &Value) -> Option<Report> {
    let object = value.as_object()?;
    let text = |field: &str| -> String {
        object
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let id = object
        .get("id")
        .and_then(Value::as_str)
        .map(ReportId::from)
        .unwrap_or_else(ReportId::generate);

    // Anything that is not exactly Done is pending.
    let status = match object.get("status").and_then(Value::as_str) {
        Some("Done") => ReportStatus::Done,
        _ => ReportStatus::Process,
    };

    Some(Report {
        id,
        requester_name: text("requesterName"),
        campus: text("campus"),
        import_date: text("importDate"),
        export_date: text("exportDate"),
        items: migrate_items(object.get("items")),
        status,
    })
}

/// Load the persisted reports, migrating legacy records and skipping
/// anything unrecognizable
pub fn load_reports(store: &dyn KvStore) -> Vec<Report> {
    let saved: Vec<Value> = load_json(store, keys::REPORTS).unwrap_or_default();
    saved.iter().filter_map(migrate_report).collect()
}

/// Load the persisted selected-report id, if any
pub fn load_selected(store: &dyn KvStore) -> Option<ReportId> {
    load_json::<String>(store, keys::SELECTED_REPORT).map(ReportId::from)
}
