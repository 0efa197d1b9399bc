//! Shared helper functions for CLI commands

use std::io::IsTerminal;

use miette::{IntoDiagnostic, Result};

use crate::core::{Config, Inventory, ReportId};

/// Format a report id for display, truncating if too long
///
/// IDs longer than 16 characters are truncated to 13 chars with "..."
/// suffix, giving a consistent width across list outputs.
pub fn format_short_id_str(id: &str) -> String {
    if id.len() > 16 {
        format!("{}...", &id[..13])
    } else {
        id.to_string()
    }
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Parse a `NAME=QUANTITY` pair with a non-negative quantity
pub fn parse_pair(raw: &str) -> Result<(String, i64)> {
    let (name, quantity) = raw
        .split_once('=')
        .ok_or_else(|| miette::miette!("expected NAME=QUANTITY, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(miette::miette!("missing item name in '{raw}'"));
    }
    let quantity: i64 = quantity
        .trim()
        .parse()
        .map_err(|_| miette::miette!("invalid quantity in '{raw}'"))?;
    if quantity < 0 {
        return Err(miette::miette!("quantity cannot be negative in '{raw}'"));
    }
    Ok((name.to_string(), quantity))
}

/// Reject item names outside the configured catalog
pub fn check_catalog_item(config: &Config, name: &str) -> Result<()> {
    if config.catalog.contains(name) {
        return Ok(());
    }
    Err(miette::miette!(
        "unknown item '{name}'; valid items: {}",
        config.catalog.items().collect::<Vec<_>>().join(", ")
    ))
}

/// Reject campuses outside the configured options
pub fn check_campus(config: &Config, campus: &str) -> Result<()> {
    if config.is_valid_campus(campus) {
        return Ok(());
    }
    Err(miette::miette!(
        "unknown campus '{campus}'; valid campuses: {}",
        config.campuses.join(", ")
    ))
}

/// Reject dates that are not YYYY-MM-DD
pub fn check_date(raw: &str) -> Result<()> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| miette::miette!("invalid date '{raw}' (expected YYYY-MM-DD)"))
}

/// Ask for confirmation, honoring --yes and refusing to hang in pipelines
pub fn confirm(prompt: &str, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(miette::miette!(
            "refusing to proceed without confirmation; pass --yes"
        ));
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .into_diagnostic()
}

/// Resolve a user-supplied token to a report id: exact match first, then a
/// unique prefix match
pub fn resolve_report_id(inventory: &Inventory, token: &str) -> Result<ReportId> {
    let exact = ReportId::from(token);
    if inventory.find_report(&exact).is_some() {
        return Ok(exact);
    }

    let matches: Vec<ReportId> = inventory
        .reports()
        .iter()
        .filter(|report| report.id.as_str().starts_with(token))
        .map(|report| report.id.clone())
        .collect();

    match matches.len() {
        1 => Ok(matches.into_iter().next().expect("one match")),
        0 => Err(miette::miette!("no report matching '{token}'")),
        n => Err(miette::miette!("'{token}' is ambiguous ({n} reports match)")),
    }
}

/// The explicitly named report, or the remembered selection
pub fn target_report_id(inventory: &Inventory, token: Option<&str>) -> Result<ReportId> {
    match token {
        Some(token) => resolve_report_id(inventory, token),
        None => inventory.selected().cloned().ok_or_else(|| {
            miette::miette!("no report selected; pass an ID or run `sit report select`")
        }),
    }
}
