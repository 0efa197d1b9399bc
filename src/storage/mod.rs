//! Key-value persistence
//!
//! Application state persists as a handful of JSON documents, one per
//! logical key, under the data directory. Reads happen once at startup,
//! writes after every committed mutation. A malformed or unreadable
//! document falls back to the default state with a styled warning; it never
//! crashes the tool.

pub mod legacy;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use console::style;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// The logical keys the application persists under
pub mod keys {
    pub const REPORTS: &str = "reports";
    pub const STOCK: &str = "stock";
    pub const SELECTED_REPORT: &str = "selected-report-id";
    pub const USERS: &str = "users";
    pub const SESSION: &str = "session";
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read key '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
}

/// Synchronous key-value storage
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// One JSON file per key under a root directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Read {
                key: key.to_string(),
                source: err,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write = || -> io::Result<()> {
            fs::create_dir_all(&self.root)?;
            fs::write(self.path(key), value)
        };
        write().map_err(|err| StorageError::Write {
            key: key.to_string(),
            source: err,
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Write {
                key: key.to_string(),
                source: err,
            }),
        }
    }
}

/// Ephemeral store backed by a map, for tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    cells: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.cells.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.cells
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.cells.borrow_mut().remove(key);
        Ok(())
    }
}

/// Warn about a non-fatal persistence problem and carry on
pub fn warn_storage(context: &str, message: impl std::fmt::Display) {
    eprintln!("{} {}: {}", style("!").yellow(), context, message);
}

/// Serialize a value under a key, warning on failure instead of erroring
pub fn save_json<T: Serialize>(store: &dyn KvStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => {
            if let Err(err) = store.set(key, &raw) {
                warn_storage("Could not save to device storage", err);
            }
        }
        Err(err) => warn_storage("Could not serialize state", err),
    }
}

/// Read and parse a key, with `None` for both absence and malformed data
pub fn load_json<T: DeserializeOwned>(store: &dyn KvStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(err) => {
            warn_storage("Could not read device storage", err);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn_storage(&format!("Ignoring malformed data under '{key}'"), err);
            None
        }
    }
}
