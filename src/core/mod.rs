//! Core module - catalog, reports, stock ledger, and the reconciliation
//! engine that keeps them consistent

pub mod auth;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod inventory;
pub mod ledger;
pub mod report;
pub mod store;

pub use auth::{AuthError, AuthStore, Role, UserAccount};
pub use catalog::{Catalog, CatalogGroup};
pub use config::Config;
pub use engine::{plan_create, plan_delete, plan_update, validate_draft, ReconcileError};
pub use inventory::Inventory;
pub use ledger::{Deficiency, StockItem, StockLedger};
pub use report::{ItemMap, Report, ReportDraft, ReportId, ReportStatus};
pub use store::ReportStore;
