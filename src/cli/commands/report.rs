//! `sit report` command - requisition report management

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::args::GlobalOpts;
use crate::cli::context::{self, today, AppContext};
use crate::cli::helpers::{
    check_campus, check_catalog_item, check_date, confirm, format_short_id_str, parse_pair,
    target_report_id, truncate_str,
};
use crate::core::{Report, ReportDraft, ReportStatus};
use crate::render::format_items;

/// CLI-friendly status enum
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliStatus {
    Process,
    Done,
}

impl From<CliStatus> for ReportStatus {
    fn from(cli: CliStatus) -> Self {
        match cli {
            CliStatus::Process => ReportStatus::Process,
            CliStatus::Done => ReportStatus::Done,
        }
    }
}

/// Status filter for list output
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusFilter {
    Process,
    Done,
    All,
}

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// List reports with filtering
    List(ListArgs),

    /// Create a new report
    New(NewArgs),

    /// Show a report's details
    Show(ShowArgs),

    /// Update a report's fields
    Update(UpdateArgs),

    /// Delete a report
    Delete(DeleteArgs),

    /// Remember a report as selected
    Select(SelectArgs),

    /// Show the selected report
    Selected,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Filter by campus
    #[arg(long, short = 'c')]
    pub campus: Option<String>,

    /// Filter by status
    #[arg(long, short = 's', default_value = "all")]
    pub status: StatusFilter,

    /// Filter by import-date year
    #[arg(long)]
    pub year: Option<i32>,

    /// Filter by import-date month (1-12)
    #[arg(long)]
    pub month: Option<u32>,

    /// Filter by exact import date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Requester name
    #[arg(long, short = 'r')]
    pub requester: Option<String>,

    /// Campus the request belongs to
    #[arg(long, short = 'c')]
    pub campus: Option<String>,

    /// Import date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub import_date: Option<String>,

    /// Export date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub export_date: Option<String>,

    /// Report status
    #[arg(long, short = 's', default_value = "process")]
    pub status: CliStatus,

    /// Requested item, repeatable (e.g., --item "A4 Paper=2")
    #[arg(long, short = 'i', value_name = "NAME=QTY")]
    pub item: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Report ID (or unique prefix); defaults to the selected report
    pub id: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct UpdateArgs {
    /// Report ID (or unique prefix); defaults to the selected report
    pub id: Option<String>,

    /// New requester name
    #[arg(long, short = 'r')]
    pub requester: Option<String>,

    /// New campus
    #[arg(long, short = 'c')]
    pub campus: Option<String>,

    /// New import date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub import_date: Option<String>,

    /// New export date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub export_date: Option<String>,

    /// New status
    #[arg(long, short = 's')]
    pub status: Option<CliStatus>,

    /// Item quantity to set, repeatable; zero removes the item
    #[arg(long, short = 'i', value_name = "NAME=QTY")]
    pub item: Vec<String>,

    /// Drop all existing items before applying --item flags
    #[arg(long)]
    pub clear_items: bool,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    /// Report ID (or unique prefix); defaults to the selected report
    pub id: Option<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(clap::Args, Debug)]
pub struct SelectArgs {
    /// Report ID (or unique prefix)
    pub id: String,
}

pub fn run(cmd: ReportCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        ReportCommands::List(args) => run_list(args, global),
        ReportCommands::New(args) => run_new(args, global),
        ReportCommands::Show(args) => run_show(args, global),
        ReportCommands::Update(args) => run_update(args, global),
        ReportCommands::Delete(args) => run_delete(args, global),
        ReportCommands::Select(args) => run_select(args, global),
        ReportCommands::Selected => run_selected(global),
    }
}

/// Apply NAME=QTY flags onto a draft after validating names
fn apply_item_flags(ctx: &AppContext, draft: &mut ReportDraft, flags: &[String]) -> Result<()> {
    for raw in flags {
        let (name, quantity) = parse_pair(raw)?;
        check_catalog_item(&ctx.config, &name)?;
        let quantity = u32::try_from(quantity)
            .map_err(|_| miette::miette!("quantity too large in '{raw}'"))?;
        draft.set_item(&name, quantity);
    }
    Ok(())
}

fn check_draft_inputs(ctx: &AppContext, draft: &ReportDraft) -> Result<()> {
    if !draft.campus.is_empty() {
        check_campus(&ctx.config, &draft.campus)?;
    }
    if !draft.import_date.is_empty() {
        check_date(&draft.import_date)?;
    }
    if !draft.export_date.is_empty() {
        check_date(&draft.export_date)?;
    }
    Ok(())
}

fn run_new(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = context::open(global)?;
    ctx.auth.require_session().into_diagnostic()?;

    let mut draft = ReportDraft {
        requester_name: args.requester.unwrap_or_default(),
        campus: args.campus.unwrap_or_default(),
        import_date: args.import_date.unwrap_or_default(),
        export_date: args.export_date.unwrap_or_default(),
        status: args.status.into(),
        ..Default::default()
    };
    apply_item_flags(&ctx, &mut draft, &args.item)?;
    check_draft_inputs(&ctx, &draft)?;

    let id = ctx
        .inventory
        .create_report(draft, today())
        .into_diagnostic()?;

    println!(
        "{} Created report {}",
        style("✓").green(),
        style(format_short_id_str(id.as_str())).cyan()
    );
    Ok(())
}

fn run_update(args: UpdateArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = context::open(global)?;
    ctx.auth.require_session().into_diagnostic()?;

    let id = target_report_id(&ctx.inventory, args.id.as_deref())?;
    let original = ctx
        .inventory
        .find_report(&id)
        .expect("resolved id exists");

    let mut draft = original.draft();
    if let Some(requester) = args.requester {
        draft.requester_name = requester;
    }
    if let Some(campus) = args.campus {
        draft.campus = campus;
    }
    if let Some(date) = args.import_date {
        draft.import_date = date;
    }
    if let Some(date) = args.export_date {
        draft.export_date = date;
    }
    if let Some(status) = args.status {
        draft.status = status.into();
    }
    if args.clear_items {
        draft.items.clear();
    }
    apply_item_flags(&ctx, &mut draft, &args.item)?;
    check_draft_inputs(&ctx, &draft)?;

    ctx.inventory
        .update_report(&id, draft, today())
        .into_diagnostic()?;

    println!(
        "{} Updated report {}",
        style("✓").green(),
        style(format_short_id_str(id.as_str())).cyan()
    );
    Ok(())
}

fn run_delete(args: DeleteArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = context::open(global)?;
    ctx.auth.require_session().into_diagnostic()?;

    let id = target_report_id(&ctx.inventory, args.id.as_deref())?;
    let report = ctx
        .inventory
        .find_report(&id)
        .expect("resolved id exists");

    let prompt = format!(
        "Permanently delete the report for {} from {}? Items of a Done report return to stock",
        report.requester_name, report.campus
    );
    if !confirm(&prompt, args.yes)? {
        println!("Aborted.");
        return Ok(());
    }

    ctx.inventory.delete_report(&id, today());
    println!(
        "{} Deleted report {}",
        style("✓").green(),
        style(format_short_id_str(id.as_str())).cyan()
    );
    Ok(())
}

fn run_list(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = context::open(global)?;

    let matches_filters = |report: &Report| -> bool {
        if let Some(campus) = &args.campus {
            if &report.campus != campus {
                return false;
            }
        }
        match args.status {
            StatusFilter::Process if report.status != ReportStatus::Process => return false,
            StatusFilter::Done if report.status != ReportStatus::Done => return false,
            _ => {}
        }
        if args.year.is_some() || args.month.is_some() || args.date.is_some() {
            if report.import_date.is_empty() {
                return false;
            }
            let mut parts = report.import_date.split('-');
            let year = parts.next().and_then(|part| part.parse::<i32>().ok());
            let month = parts.next().and_then(|part| part.parse::<u32>().ok());
            if let Some(want) = args.year {
                if year != Some(want) {
                    return false;
                }
            }
            if let Some(want) = args.month {
                if month != Some(want) {
                    return false;
                }
            }
            if let Some(want) = &args.date {
                if &report.import_date != want {
                    return false;
                }
            }
        }
        true
    };

    let reports: Vec<&Report> = ctx
        .inventory
        .reports()
        .iter()
        .filter(|report| matches_filters(report))
        .collect();

    if reports.is_empty() {
        println!("No reports found.");
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Requester", "Campus", "Dates", "Items", "Total", "Status"]);
    for report in &reports {
        builder.push_record([
            format_short_id_str(report.id.as_str()),
            truncate_str(&report.requester_name, 24),
            report.campus.clone(),
            format!("{} to {}", report.import_date, report.export_date),
            truncate_str(&format_items(report), 40),
            report.total_items().to_string(),
            report.status.to_string(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::sharp());
    println!("{table}");
    println!();
    println!("{} report(s) found.", style(reports.len()).cyan());
    Ok(())
}

fn run_show(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let ctx = context::open(global)?;
    let id = target_report_id(&ctx.inventory, args.id.as_deref())?;
    let report = ctx
        .inventory
        .find_report(&id)
        .expect("resolved id exists");

    print_report(report);
    Ok(())
}

fn run_select(args: SelectArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = context::open(global)?;
    let id = target_report_id(&ctx.inventory, Some(&args.id))?;
    ctx.inventory.select_report(&id);
    println!(
        "{} Selected report {}",
        style("✓").green(),
        style(format_short_id_str(id.as_str())).cyan()
    );
    Ok(())
}

fn run_selected(global: &GlobalOpts) -> Result<()> {
    let ctx = context::open(global)?;
    match ctx.inventory.selected() {
        Some(id) => {
            let report = ctx
                .inventory
                .find_report(id)
                .expect("selection is validated on load");
            print_report(report);
        }
        None => println!("No report selected."),
    }
    Ok(())
}

fn print_report(report: &Report) {
    let status = match report.status {
        ReportStatus::Done => style("Done").green(),
        ReportStatus::Process => style("Process").yellow(),
    };
    println!("{}", style(report.id.as_str()).cyan());
    println!("  Requester: {}", report.requester_name);
    println!("  Campus:    {}", report.campus);
    println!("  Dates:     {} to {}", report.import_date, report.export_date);
    println!("  Status:    {}", status);
    println!("  Items ({} total):", report.total_items());
    for (item, quantity) in &report.items {
        println!("    {} x{}", item, quantity);
    }
}
