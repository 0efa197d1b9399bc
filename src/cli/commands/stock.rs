//! `sit stock` command - stock ledger inspection and editing

use std::collections::BTreeMap;

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::args::GlobalOpts;
use crate::cli::context::{self, today};
use crate::cli::helpers::{check_catalog_item, confirm, parse_pair};

#[derive(Subcommand, Debug)]
pub enum StockCommands {
    /// Show the current stock ledger
    Show,

    /// Set absolute quantities (bulk stock edit)
    Set(SetArgs),

    /// Reset every quantity to zero
    Clear(ClearArgs),
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// Quantities to set, e.g. "A4 Paper=20" "Mouse=10"
    #[arg(value_name = "NAME=QTY", required = true)]
    pub items: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: StockCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        StockCommands::Show => run_show(global),
        StockCommands::Set(args) => run_set(args, global),
        StockCommands::Clear(args) => run_clear(args, global),
    }
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let ctx = context::open(global)?;

    let mut builder = Builder::default();
    builder.push_record(["Item", "Quantity", "Last In", "Last Out", "Last Change"]);
    for (item, entry) in ctx.inventory.ledger().iter() {
        let change = match entry.last_update_quantity {
            0 => String::new(),
            delta if delta > 0 => format!("+{delta}"),
            delta => delta.to_string(),
        };
        builder.push_record([
            item.clone(),
            entry.quantity.to_string(),
            entry
                .last_in_date
                .map_or_else(String::new, |date| date.to_string()),
            entry
                .last_out_date
                .map_or_else(String::new, |date| date.to_string()),
            change,
        ]);
    }
    let mut table = builder.build();
    table.with(Style::sharp());
    println!("{table}");
    Ok(())
}

fn run_set(args: SetArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = context::open(global)?;
    ctx.auth.require_session().into_diagnostic()?;

    let mut quantities = BTreeMap::new();
    for raw in &args.items {
        let (name, quantity) = parse_pair(raw)?;
        check_catalog_item(&ctx.config, &name)?;
        quantities.insert(name, quantity);
    }

    ctx.inventory.edit_stock_bulk(&quantities, today());
    println!(
        "{} Stock updated ({} item(s))",
        style("✓").green(),
        style(quantities.len()).cyan()
    );
    Ok(())
}

fn run_clear(args: ClearArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = context::open(global)?;
    ctx.auth.require_session().into_diagnostic()?;

    if !confirm(
        "Permanently clear all stock data? This sets the quantity of every item to 0",
        args.yes,
    )? {
        println!("Aborted.");
        return Ok(());
    }

    ctx.inventory.clear_stock();
    println!("{} Stock cleared", style("✓").green());
    Ok(())
}
