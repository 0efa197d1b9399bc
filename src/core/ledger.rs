//! Stock ledger - per-item quantities and activity dates
//!
//! The ledger is a dumb mutator: `apply_delta` and `set_absolute` never
//! fail, unknown items are inert, and nothing here prevents a negative
//! quantity. Correctness is the reconciliation engine's responsibility via
//! the sufficiency gate performed before any stock-affecting transition.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::catalog::Catalog;

/// Optional ISO dates persisted as plain strings, empty when absent
pub(crate) mod opt_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.serialize_str(&date.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok())
    }
}

/// Tracked state for one catalog item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    /// Current quantity on hand
    pub quantity: i64,

    /// Date of the most recent stock-in, empty if none recorded
    #[serde(default, with = "opt_date")]
    pub last_in_date: Option<NaiveDate>,

    /// Date of the most recent stock-out, empty if none recorded
    #[serde(default, with = "opt_date")]
    pub last_out_date: Option<NaiveDate>,

    /// Signed delta of the most recent change, zero if none recorded
    #[serde(default)]
    pub last_update_quantity: i64,
}

/// One deficient item from a sufficiency check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deficiency {
    pub item: String,
    pub requested: i64,
    pub available: i64,
}

impl std::fmt::Display for Deficiency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (requested {}, available {})",
            self.item, self.requested, self.available
        )
    }
}

/// The stock ledger: one entry per catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockLedger {
    items: BTreeMap<String, StockItem>,
}

impl StockLedger {
    /// A zeroed ledger carrying every catalog item
    pub fn for_catalog(catalog: &Catalog) -> Self {
        Self {
            items: catalog
                .items()
                .map(|item| (item.to_string(), StockItem::default()))
                .collect(),
        }
    }

    /// Build a ledger from already-migrated entries
    pub fn from_items(items: BTreeMap<String, StockItem>) -> Self {
        Self { items }
    }

    /// Apply a signed quantity change to one item
    ///
    /// A positive delta stamps `last_in_date`, a negative one stamps
    /// `last_out_date`; the other date field is left untouched. Zero deltas
    /// and unknown items change nothing.
    pub fn apply_delta(&mut self, item: &str, delta: i64, today: NaiveDate) {
        if delta == 0 {
            return;
        }
        let Some(entry) = self.items.get_mut(item) else {
            return;
        };
        entry.quantity += delta;
        if delta > 0 {
            entry.last_in_date = Some(today);
        } else {
            entry.last_out_date = Some(today);
        }
        entry.last_update_quantity = delta;
    }

    /// Set an item's quantity directly (bulk stock edit)
    pub fn set_absolute(&mut self, item: &str, quantity: i64, today: NaiveDate) {
        let delta = quantity - self.quantity(item);
        self.apply_delta(item, delta, today);
    }

    /// Reset every entry to quantity zero with no recorded activity
    pub fn clear_all(&mut self) {
        for entry in self.items.values_mut() {
            *entry = StockItem::default();
        }
    }

    /// Items whose demand exceeds the available quantity
    ///
    /// Read-only; returns every deficient item, never just the first.
    /// Demands for items the ledger does not carry count as available zero.
    pub fn sufficiency_check(&self, demands: &BTreeMap<String, i64>) -> Vec<Deficiency> {
        demands
            .iter()
            .filter_map(|(item, requested)| {
                let available = self.quantity(item);
                (*requested > available).then(|| Deficiency {
                    item: item.clone(),
                    requested: *requested,
                    available,
                })
            })
            .collect()
    }

    /// Current quantity for an item, zero when unknown
    pub fn quantity(&self, item: &str) -> i64 {
        self.items.get(item).map_or(0, |entry| entry.quantity)
    }

    pub fn get(&self, item: &str) -> Option<&StockItem> {
        self.items.get(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StockItem)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
