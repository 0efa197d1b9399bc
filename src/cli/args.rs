//! CLI argument parsing

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::export::ExportCommands;
use crate::cli::commands::import_cmd::ImportArgs;
use crate::cli::commands::report::ReportCommands;
use crate::cli::commands::session::LoginArgs;
use crate::cli::commands::stock::StockCommands;
use crate::cli::commands::user::UserCommands;

#[derive(Parser, Debug)]
#[command(
    name = "sit",
    version,
    about = "Stationary Inventory Toolkit - requisition reports and stock reconciliation"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Data directory (defaults to the platform data dir)
    #[arg(long, env = "SIT_DATA_DIR", global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage requisition reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Inspect and edit the stock ledger
    #[command(subcommand)]
    Stock(StockCommands),

    /// Import reports and stock from a document
    Import(ImportArgs),

    /// Export printable documents
    #[command(subcommand)]
    Export(ExportCommands),

    /// Manage user accounts
    #[command(subcommand)]
    User(UserCommands),

    /// Log in and start a session
    Login(LoginArgs),

    /// End the current session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
