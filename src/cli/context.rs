//! Shared command context
//!
//! Every command opens the same two context objects: the inventory
//! (reports + ledger) and the auth store, both backed by JSON files under
//! the data directory.

use std::path::PathBuf;

use chrono::NaiveDate;
use directories::ProjectDirs;
use miette::Result;

use crate::cli::args::GlobalOpts;
use crate::core::{AuthStore, Config, Inventory};
use crate::storage::JsonFileStore;

pub struct AppContext {
    pub config: Config,
    pub inventory: Inventory,
    pub auth: AuthStore,
    pub data_dir: PathBuf,
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn resolve_data_dir(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(dir) = &global.data_dir {
        return Ok(dir.clone());
    }
    let dirs = ProjectDirs::from("", "", "sit").ok_or_else(|| {
        miette::miette!("could not determine a data directory; pass --data-dir")
    })?;
    Ok(dirs.data_dir().to_path_buf())
}

/// Open config, inventory, and auth from the resolved data directory
pub fn open(global: &GlobalOpts) -> Result<AppContext> {
    let data_dir = resolve_data_dir(global)?;
    let config = Config::load(&data_dir);
    let inventory = Inventory::load(
        Box::new(JsonFileStore::new(&data_dir)),
        &config.catalog,
        today(),
    );
    let auth = AuthStore::load(Box::new(JsonFileStore::new(&data_dir)));
    Ok(AppContext {
        config,
        inventory,
        auth,
        data_dir,
    })
}
