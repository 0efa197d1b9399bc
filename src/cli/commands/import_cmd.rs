//! `sit import` command - document import

use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::cli::context;
use crate::import::{
    GeminiExtractor, ImportPipeline, ImportSource, PlainTextExtractor, StructuredExtractor,
};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Document to import reports and stock from
    pub file: PathBuf,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = context::open(global)?;
    ctx.auth.require_session().into_diagnostic()?;

    let document = std::fs::read(&args.file).into_diagnostic()?;

    let extractor = PlainTextExtractor;
    let service = GeminiExtractor::from_env(&ctx.config);
    let pipeline = ImportPipeline::new(
        &extractor,
        service
            .as_ref()
            .map(|client| client as &dyn StructuredExtractor),
        &ctx.config,
    );

    // Everything external happens before this point; the commit below is
    // the only state change.
    let (replacement, source) = pipeline.run(&document).into_diagnostic()?;
    let report_count = replacement.reports.len();
    ctx.inventory
        .replace_all(replacement.reports, replacement.ledger);

    match source {
        ImportSource::Service => println!(
            "{} Imported {} report(s) and replaced the stock inventory",
            style("✓").green(),
            style(report_count).cyan()
        ),
        ImportSource::DemoFallback => {
            println!(
                "{} Demo mode: the document processing service is not configured.",
                style("!").yellow()
            );
            println!(
                "  Sample data has been loaded instead ({} report(s)).",
                style(report_count).cyan()
            );
        }
    }
    Ok(())
}
