//! Item catalog and campus options
//!
//! Stock is tracked over a fixed catalog of stationary items. Report
//! activity never adds or removes catalog entries; only the numeric fields
//! of each entry change. The catalog ships with built-in defaults and can
//! be overridden from the config file.

use serde::{Deserialize, Serialize};

/// A named group of catalog items, mirroring the request form sections
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogGroup {
    /// Group heading (e.g., "Inks & Toners")
    pub name: String,

    /// Item names in this group
    pub items: Vec<String>,
}

/// The fixed set of stationary items quantities are tracked for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub groups: Vec<CatalogGroup>,
}

impl Catalog {
    /// Iterate over every item name across all groups
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|group| group.items.iter().map(String::as_str))
    }

    /// Whether the catalog carries an item with this exact name
    pub fn contains(&self, name: &str) -> bool {
        self.items().any(|item| item == name)
    }

    /// Total number of catalog items
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let group = |name: &str, items: &[&str]| CatalogGroup {
            name: name.to_string(),
            items: items.iter().map(|item| item.to_string()).collect(),
        };

        Self {
            groups: vec![
                group(
                    "Inks & Toners",
                    &["Bk", "CMY", "Toner 05A", "Toner 12A", "Drum 19A", "Ink 664"],
                ),
                group(
                    "Peripherals & Supplies",
                    &[
                        "A4 Paper",
                        "A3 Paper",
                        "Mouse",
                        "Keyboard",
                        "Webcam",
                        "Stapler",
                        "Whiteboard Marker",
                        "Envelope",
                    ],
                ),
            ],
        }
    }
}

/// Built-in campus options
pub fn default_campuses() -> Vec<String> {
    ["Campus1", "Campus2", "Campus3"]
        .iter()
        .map(|campus| campus.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_contains_both_groups() {
        let catalog = Catalog::default();
        assert_eq!(catalog.groups.len(), 2);
        assert!(catalog.contains("A4 Paper"));
        assert!(catalog.contains("Bk"));
        assert!(!catalog.contains("Flux Capacitor"));
    }

    #[test]
    fn test_items_spans_groups() {
        let catalog = Catalog::default();
        assert_eq!(catalog.items().count(), catalog.len());
        assert!(catalog.len() > 10);
    }
}
