//! Reconciliation engine - ledger deltas for report lifecycle transitions
//!
//! Pure planning functions: given the current ledger and a proposed report
//! change, each either rejects the transition or returns the exact ledger
//! deltas that must be applied together with the report mutation. Nothing
//! here mutates state, so a failed gate trivially leaves both the store and
//! the ledger untouched.
//!
//! Transition table (status is the only stock-relevant report field):
//!
//! | Transition            | Ledger effect                    | Gate                         |
//! |-----------------------|----------------------------------|------------------------------|
//! | create Process        | none                             | required fields, items > 0   |
//! | create Done           | deduct new items                 | sufficiency on new items     |
//! | update Process→Process| none                             | required fields, items > 0   |
//! | update Process→Done   | deduct new items                 | sufficiency on new items     |
//! | update Done→Process   | return original items            | none                         |
//! | update Done→Done      | per union key: old − new         | sufficiency on increases     |
//! | delete Process        | none                             | none                         |
//! | delete Done           | return the report's items        | none                         |

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::core::ledger::{Deficiency, StockLedger};
use crate::core::report::{Report, ReportDraft, ReportStatus};

/// A single signed quantity change to apply to the ledger
pub type LedgerDelta = (String, i64);

/// Rejections raised by the gates
///
/// Every rejection is recoverable: the proposed change is abandoned and no
/// state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error("Missing Information: please fill in {}", .fields.join(", "))]
    MissingInformation { fields: Vec<&'static str> },

    #[error("Empty Report: a report must contain at least one stationary item")]
    EmptyReport,

    #[error("Insufficient Stock: {}", format_deficits(.deficits))]
    InsufficientStock { deficits: Vec<Deficiency> },
}

fn format_deficits(deficits: &[Deficiency]) -> String {
    deficits
        .iter()
        .map(Deficiency::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Required-fields and non-empty-items gate, applied to create and update
pub fn validate_draft(draft: &ReportDraft) -> Result<(), ReconcileError> {
    let mut fields = Vec::new();
    if draft.requester_name.trim().is_empty() {
        fields.push("requester name");
    }
    if draft.campus.trim().is_empty() {
        fields.push("campus");
    }
    if draft.import_date.trim().is_empty() {
        fields.push("import date");
    }
    if draft.export_date.trim().is_empty() {
        fields.push("export date");
    }
    if !fields.is_empty() {
        return Err(ReconcileError::MissingInformation { fields });
    }
    if draft.total_items() == 0 {
        return Err(ReconcileError::EmptyReport);
    }
    Ok(())
}

fn demands_of(items: &crate::core::report::ItemMap) -> BTreeMap<String, i64> {
    items
        .iter()
        .map(|(item, quantity)| (item.clone(), i64::from(*quantity)))
        .collect()
}

fn deduction_of(items: &crate::core::report::ItemMap) -> Vec<LedgerDelta> {
    items
        .iter()
        .map(|(item, quantity)| (item.clone(), -i64::from(*quantity)))
        .collect()
}

fn restitution_of(items: &crate::core::report::ItemMap) -> Vec<LedgerDelta> {
    items
        .iter()
        .map(|(item, quantity)| (item.clone(), i64::from(*quantity)))
        .collect()
}

fn gate_sufficiency(
    ledger: &StockLedger,
    demands: &BTreeMap<String, i64>,
) -> Result<(), ReconcileError> {
    let deficits = ledger.sufficiency_check(demands);
    if deficits.is_empty() {
        Ok(())
    } else {
        Err(ReconcileError::InsufficientStock { deficits })
    }
}

/// Plan the ledger deltas for creating a report
pub fn plan_create(
    draft: &ReportDraft,
    ledger: &StockLedger,
) -> Result<Vec<LedgerDelta>, ReconcileError> {
    validate_draft(draft)?;
    match draft.status {
        ReportStatus::Process => Ok(Vec::new()),
        ReportStatus::Done => {
            gate_sufficiency(ledger, &demands_of(&draft.items))?;
            Ok(deduction_of(&draft.items))
        }
    }
}

/// Plan the ledger deltas for updating a report
///
/// The Done→Done case works over the union of old and new item keys with
/// `delta = old − new` per item: a reduced request returns stock, an
/// increased one consumes more. Only increases are gated.
pub fn plan_update(
    original: &Report,
    draft: &ReportDraft,
    ledger: &StockLedger,
) -> Result<Vec<LedgerDelta>, ReconcileError> {
    validate_draft(draft)?;
    match (original.status, draft.status) {
        (ReportStatus::Process, ReportStatus::Process) => Ok(Vec::new()),
        (ReportStatus::Process, ReportStatus::Done) => {
            gate_sufficiency(ledger, &demands_of(&draft.items))?;
            Ok(deduction_of(&draft.items))
        }
        (ReportStatus::Done, ReportStatus::Process) => Ok(restitution_of(&original.items)),
        (ReportStatus::Done, ReportStatus::Done) => {
            let keys: BTreeSet<&String> =
                original.items.keys().chain(draft.items.keys()).collect();

            let mut demands = BTreeMap::new();
            let mut deltas = Vec::new();
            for key in keys {
                let old = original.items.get(key).copied().map_or(0, i64::from);
                let new = draft.items.get(key).copied().map_or(0, i64::from);
                if new > old {
                    demands.insert(key.clone(), new - old);
                }
                if old != new {
                    deltas.push((key.clone(), old - new));
                }
            }

            gate_sufficiency(ledger, &demands)?;
            Ok(deltas)
        }
    }
}

/// Plan the ledger deltas for deleting a report
///
/// Returning stock can never be insufficient, so there is no gate.
pub fn plan_delete(report: &Report) -> Vec<LedgerDelta> {
    match report.status {
        ReportStatus::Process => Vec::new(),
        ReportStatus::Done => restitution_of(&report.items),
    }
}
