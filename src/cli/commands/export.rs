//! `sit export` command - printable documents

use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::cli::context::{self, today};
use crate::render::{CsvRenderer, DocumentRenderer, TextRenderer};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Text,
    Csv,
}

#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Reports grouped by status plus the stock table
    Full(ExportArgs),

    /// The stock table alone
    Stock(ExportArgs),
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Directory the document is saved into
    #[arg(long, short = 'o', default_value = ".", value_name = "DIR")]
    pub out: PathBuf,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: ExportFormat,
}

pub fn run(cmd: ExportCommands, global: &GlobalOpts) -> Result<()> {
    let (args, full) = match cmd {
        ExportCommands::Full(args) => (args, true),
        ExportCommands::Stock(args) => (args, false),
    };
    let ctx = context::open(global)?;

    let renderer: Box<dyn DocumentRenderer> = match args.format {
        ExportFormat::Text => Box::new(TextRenderer::new(&args.out)),
        ExportFormat::Csv => Box::new(CsvRenderer::new(&args.out)),
    };

    let path = if full {
        renderer.render_full(ctx.inventory.reports(), ctx.inventory.ledger(), today())
    } else {
        renderer.render_stock(ctx.inventory.ledger(), today())
    }
    .into_diagnostic()?;

    println!(
        "{} Saved {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    Ok(())
}
