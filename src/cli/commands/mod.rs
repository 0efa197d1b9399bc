//! CLI command implementations

pub mod completions;
pub mod export;
pub mod import_cmd;
pub mod report;
pub mod session;
pub mod stock;
pub mod user;
