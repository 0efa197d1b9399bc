//! Report entity - a stationary requisition record

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Report status values
///
/// `Done` means the items have been physically disbursed and are reflected
/// in the stock ledger; `Process` is pending and has no stock effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[derive(Default)]
pub enum ReportStatus {
    #[default]
    Process,
    Done,
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Process => write!(f, "Process"),
            ReportStatus::Done => write!(f, "Done"),
        }
    }
}

impl std::str::FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "process" => Ok(ReportStatus::Process),
            "done" => Ok(ReportStatus::Done),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// Unique report identifier
///
/// New reports get a ULID-based token; identifiers loaded from persisted
/// data are treated as opaque strings and kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(format!("RPT-{}", Ulid::new()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ReportId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for ReportId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

/// Item name to requested quantity
///
/// Quantities are always positive; a zero or negative entry is removed
/// rather than stored.
pub type ItemMap = BTreeMap<String, u32>;

/// A requisition report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Unique identifier, assigned at creation and never changed
    pub id: ReportId,

    /// Who requested the items
    pub requester_name: String,

    /// Campus the request belongs to
    pub campus: String,

    /// ISO date (YYYY-MM-DD) the items entered the request
    pub import_date: String,

    /// ISO date (YYYY-MM-DD) the items leave
    pub export_date: String,

    /// Requested items and quantities
    #[serde(default)]
    pub items: ItemMap,

    #[serde(default)]
    pub status: ReportStatus,
}

impl Report {
    /// Total requested quantity across all items
    pub fn total_items(&self) -> u64 {
        self.items.values().map(|quantity| u64::from(*quantity)).sum()
    }

    /// Field values of this report, for edit flows
    pub fn draft(&self) -> ReportDraft {
        ReportDraft {
            requester_name: self.requester_name.clone(),
            campus: self.campus.clone(),
            import_date: self.import_date.clone(),
            export_date: self.export_date.clone(),
            items: self.items.clone(),
            status: self.status,
        }
    }
}

/// Field values for creating or updating a report (everything but the id)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    pub requester_name: String,
    pub campus: String,
    pub import_date: String,
    pub export_date: String,
    #[serde(default)]
    pub items: ItemMap,
    #[serde(default)]
    pub status: ReportStatus,
}

impl ReportDraft {
    /// Set an item quantity; zero removes the entry
    pub fn set_item(&mut self, name: &str, quantity: u32) {
        if quantity > 0 {
            self.items.insert(name.to_string(), quantity);
        } else {
            self.items.remove(name);
        }
    }

    /// Total requested quantity across all items
    pub fn total_items(&self) -> u64 {
        self.items.values().map(|quantity| u64::from(*quantity)).sum()
    }

    /// Materialize a report with the given identifier
    pub fn into_report(self, id: ReportId) -> Report {
        Report {
            id,
            requester_name: self.requester_name,
            campus: self.campus,
            import_date: self.import_date,
            export_date: self.export_date,
            items: self.items,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_with_original_casing() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::Process).unwrap(),
            "\"Process\""
        );
        assert_eq!(serde_json::to_string(&ReportStatus::Done).unwrap(), "\"Done\"");
    }

    #[test]
    fn test_status_from_str_is_case_insensitive() {
        assert_eq!("done".parse::<ReportStatus>().unwrap(), ReportStatus::Done);
        assert_eq!("Process".parse::<ReportStatus>().unwrap(), ReportStatus::Process);
        assert!("pending".parse::<ReportStatus>().is_err());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ReportId::generate();
        let b = ReportId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("RPT-"));
    }

    #[test]
    fn test_set_item_removes_zero_quantities() {
        let mut draft = ReportDraft::default();
        draft.set_item("A4 Paper", 3);
        assert_eq!(draft.items.get("A4 Paper"), Some(&3));

        draft.set_item("A4 Paper", 0);
        assert!(draft.items.is_empty());
    }

    #[test]
    fn test_report_json_uses_camel_case_fields() {
        let mut draft = ReportDraft {
            requester_name: "Sok Dara".to_string(),
            campus: "Campus1".to_string(),
            import_date: "2026-01-05".to_string(),
            export_date: "2026-01-06".to_string(),
            ..Default::default()
        };
        draft.set_item("Mouse", 1);
        let report = draft.into_report(ReportId::from("RPT-TEST"));

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"requesterName\":\"Sok Dara\""));
        assert!(json.contains("\"importDate\":\"2026-01-05\""));

        let parsed: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.total_items(), 1);
        assert_eq!(parsed.status, ReportStatus::Process);
    }
}
