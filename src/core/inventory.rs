//! Inventory context - report store and stock ledger committed as a unit
//!
//! Every engine operation follows the same shape: plan against current
//! state, then apply the ledger deltas and the report mutation together and
//! persist. A failed gate applies neither. Persistence failures are warned
//! about and the in-memory state keeps going.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::core::catalog::Catalog;
use crate::core::engine::{plan_create, plan_delete, plan_update, ReconcileError};
use crate::core::ledger::StockLedger;
use crate::core::report::{Report, ReportDraft, ReportId};
use crate::core::store::ReportStore;
use crate::storage::{self, keys, legacy, warn_storage, KvStore};

pub struct Inventory {
    store: ReportStore,
    ledger: StockLedger,
    selected: Option<ReportId>,
    storage: Box<dyn KvStore>,
}

impl Inventory {
    /// Load persisted state, migrating legacy shapes as needed
    ///
    /// A persisted selection pointing at a report that no longer exists is
    /// cleared here.
    pub fn load(storage: Box<dyn KvStore>, catalog: &Catalog, today: NaiveDate) -> Self {
        let store = ReportStore::from_reports(legacy::load_reports(storage.as_ref()));
        let ledger = legacy::load_stock(storage.as_ref(), catalog, today);
        let selected = legacy::load_selected(storage.as_ref()).filter(|id| store.contains(id));

        Self {
            store,
            ledger,
            selected,
            storage,
        }
    }

    pub fn reports(&self) -> &[Report] {
        self.store.list()
    }

    pub fn find_report(&self, id: &ReportId) -> Option<&Report> {
        self.store.find(id)
    }

    pub fn ledger(&self) -> &StockLedger {
        &self.ledger
    }

    pub fn selected(&self) -> Option<&ReportId> {
        self.selected.as_ref()
    }

    /// Create a report, deducting stock when it arrives already Done
    pub fn create_report(
        &mut self,
        draft: ReportDraft,
        today: NaiveDate,
    ) -> Result<ReportId, ReconcileError> {
        let deltas = plan_create(&draft, &self.ledger)?;
        for (item, delta) in deltas {
            self.ledger.apply_delta(&item, delta, today);
        }
        let id = self.store.create(draft);
        self.persist();
        Ok(id)
    }

    /// Replace a report's fields, reconciling the ledger with the status
    /// transition
    ///
    /// Returns `Ok(false)` when no report carries the id.
    pub fn update_report(
        &mut self,
        id: &ReportId,
        draft: ReportDraft,
        today: NaiveDate,
    ) -> Result<bool, ReconcileError> {
        let Some(original) = self.store.find(id) else {
            return Ok(false);
        };
        let deltas = plan_update(original, &draft, &self.ledger)?;
        for (item, delta) in deltas {
            self.ledger.apply_delta(&item, delta, today);
        }
        self.store.update(id, draft);
        self.persist();
        Ok(true)
    }

    /// Delete a report, returning its items to stock when it was Done
    ///
    /// Returns `false` when no report carries the id.
    pub fn delete_report(&mut self, id: &ReportId, today: NaiveDate) -> bool {
        let Some(report) = self.store.delete(id) else {
            return false;
        };
        for (item, delta) in plan_delete(&report) {
            self.ledger.apply_delta(&item, delta, today);
        }
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.persist();
        true
    }

    /// Bulk stock edit: set absolute quantities for the given items
    pub fn edit_stock_bulk(&mut self, quantities: &BTreeMap<String, i64>, today: NaiveDate) {
        for (item, quantity) in quantities {
            self.ledger.set_absolute(item, *quantity, today);
        }
        self.persist();
    }

    /// Unconditionally reset every ledger entry to zero
    pub fn clear_stock(&mut self) {
        self.ledger.clear_all();
        self.persist();
    }

    /// Replace all reports and stock at once (import commit)
    pub fn replace_all(&mut self, reports: Vec<Report>, ledger: StockLedger) {
        self.store = ReportStore::from_reports(reports);
        self.ledger = ledger;
        self.selected = None;
        self.persist();
    }

    /// Remember a report as selected; `false` when the id is unknown
    pub fn select_report(&mut self, id: &ReportId) -> bool {
        if !self.store.contains(id) {
            return false;
        }
        self.selected = Some(id.clone());
        self.persist_selection();
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.persist_selection();
    }

    fn persist(&self) {
        storage::save_json(self.storage.as_ref(), keys::REPORTS, &self.store.list());
        storage::save_json(self.storage.as_ref(), keys::STOCK, &self.ledger);
        self.persist_selection();
    }

    fn persist_selection(&self) {
        match &self.selected {
            Some(id) => storage::save_json(self.storage.as_ref(), keys::SELECTED_REPORT, id),
            None => {
                if let Err(err) = self.storage.remove(keys::SELECTED_REPORT) {
                    warn_storage("Could not clear selection", err);
                }
            }
        }
    }
}
