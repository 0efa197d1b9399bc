//! Tool configuration
//!
//! Read from `config.yaml` in the data directory. Every field has a
//! built-in default, so the file is optional; a malformed file is warned
//! about and ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::catalog::{default_campuses, Catalog};
use crate::storage::warn_storage;

/// Settings for the generative extraction service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Model identifier sent to the service
    pub model: String,

    /// Environment variable the credential is read from
    pub api_key_env: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "API_KEY".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Item catalog, grouped the way the request form shows it
    pub catalog: Catalog,

    /// Valid campus options
    pub campuses: Vec<String>,

    pub extraction: ExtractionConfig,
}

impl Config {
    /// Load from `config.yaml` under the data directory
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join("config.yaml");
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(_) => return Self::with_defaults(),
        };
        match serde_yml::from_str::<Config>(&raw) {
            Ok(mut config) => {
                if config.campuses.is_empty() {
                    config.campuses = default_campuses();
                }
                if config.catalog.is_empty() {
                    config.catalog = Catalog::default();
                }
                config
            }
            Err(err) => {
                warn_storage(&format!("Ignoring malformed {}", path.display()), err);
                Self::with_defaults()
            }
        }
    }

    pub fn with_defaults() -> Self {
        Self {
            catalog: Catalog::default(),
            campuses: default_campuses(),
            extraction: ExtractionConfig::default(),
        }
    }

    /// Whether this campus name is one of the configured options
    pub fn is_valid_campus(&self, campus: &str) -> bool {
        self.campuses.iter().any(|option| option == campus)
    }
}
