//! Report store - ordered collection of requisition reports
//!
//! Newest reports come first. Updates replace the record in place without
//! reordering; update and delete on an unknown id are no-ops.

use crate::core::report::{Report, ReportDraft, ReportId};

#[derive(Debug, Clone, Default)]
pub struct ReportStore {
    reports: Vec<Report>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap already-loaded reports, preserving their order
    pub fn from_reports(reports: Vec<Report>) -> Self {
        Self { reports }
    }

    /// Create a report from the draft and prepend it
    pub fn create(&mut self, draft: ReportDraft) -> ReportId {
        let id = ReportId::generate();
        self.reports.insert(0, draft.into_report(id.clone()));
        id
    }

    /// Replace the record with this id, keeping its position
    ///
    /// Returns `false` when no report carries the id.
    pub fn update(&mut self, id: &ReportId, draft: ReportDraft) -> bool {
        match self.reports.iter_mut().find(|report| &report.id == id) {
            Some(slot) => {
                *slot = draft.into_report(id.clone());
                true
            }
            None => false,
        }
    }

    /// Remove the report with this id, returning it if present
    pub fn delete(&mut self, id: &ReportId) -> Option<Report> {
        let index = self.reports.iter().position(|report| &report.id == id)?;
        Some(self.reports.remove(index))
    }

    pub fn find(&self, id: &ReportId) -> Option<&Report> {
        self.reports.iter().find(|report| &report.id == id)
    }

    pub fn contains(&self, id: &ReportId) -> bool {
        self.find(id).is_some()
    }

    pub fn list(&self) -> &[Report] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(requester: &str) -> ReportDraft {
        let mut draft = ReportDraft {
            requester_name: requester.to_string(),
            campus: "Campus1".to_string(),
            import_date: "2026-03-01".to_string(),
            export_date: "2026-03-02".to_string(),
            ..Default::default()
        };
        draft.set_item("Mouse", 1);
        draft
    }

    #[test]
    fn test_create_prepends() {
        let mut store = ReportStore::new();
        store.create(draft("first"));
        store.create(draft("second"));

        let names: Vec<&str> = store
            .list()
            .iter()
            .map(|report| report.requester_name.as_str())
            .collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = ReportStore::new();
        let oldest = store.create(draft("oldest"));
        store.create(draft("newest"));

        let mut changed = draft("oldest");
        changed.requester_name = "oldest, renamed".to_string();
        assert!(store.update(&oldest, changed));

        assert_eq!(store.list()[1].requester_name, "oldest, renamed");
        assert_eq!(store.list()[1].id, oldest);
    }

    #[test]
    fn test_missing_id_operations_are_noops() {
        let mut store = ReportStore::new();
        store.create(draft("only"));
        let ghost = ReportId::from("RPT-GHOST");

        assert!(!store.update(&ghost, draft("ghost")));
        assert!(store.delete(&ghost).is_none());
        assert!(store.find(&ghost).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_returns_the_report() {
        let mut store = ReportStore::new();
        let id = store.create(draft("gone"));

        let removed = store.delete(&id).unwrap();
        assert_eq!(removed.requester_name, "gone");
        assert!(store.is_empty());
    }
}
