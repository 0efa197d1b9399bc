//! `sit user` command - account management (admin only)

use std::io::IsTerminal;

use clap::{Subcommand, ValueEnum};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Password;
use miette::{IntoDiagnostic, Result};
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::args::GlobalOpts;
use crate::cli::context;
use crate::cli::helpers::confirm;
use crate::core::Role;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliRole {
    Admin,
    User,
}

impl From<CliRole> for Role {
    fn from(cli: CliRole) -> Self {
        match cli {
            CliRole::Admin => Role::Admin,
            CliRole::User => Role::User,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Create an account
    Add(AddArgs),

    /// List accounts
    List,

    /// Delete an account
    Remove(RemoveArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Username for the new account
    #[arg(long, short = 'u')]
    pub username: String,

    /// Password (prompted for when omitted)
    #[arg(long, short = 'p')]
    pub password: Option<String>,

    /// Account role
    #[arg(long, short = 'r', default_value = "user")]
    pub role: CliRole,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Username of the account to delete
    pub username: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

pub fn run(cmd: UserCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        UserCommands::Add(args) => run_add(args, global),
        UserCommands::List => run_list(global),
        UserCommands::Remove(args) => run_remove(args, global),
    }
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = context::open(global)?;
    ctx.auth.require_admin().into_diagnostic()?;

    if args.username.trim().is_empty() {
        return Err(miette::miette!("username cannot be empty"));
    }

    let password = match args.password {
        Some(password) => password,
        None if std::io::stdin().is_terminal() => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .into_diagnostic()?,
        None => return Err(miette::miette!("pass --password when not running in a terminal")),
    };
    if password.trim().is_empty() {
        return Err(miette::miette!("password cannot be empty"));
    }

    ctx.auth
        .add_user(&args.username, &password, args.role.into())
        .into_diagnostic()?;

    println!(
        "{} Created user {} ({})",
        style("✓").green(),
        style(&args.username).cyan(),
        Role::from(args.role)
    );
    Ok(())
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let ctx = context::open(global)?;
    ctx.auth.require_admin().into_diagnostic()?;

    let mut builder = Builder::default();
    builder.push_record(["Username", "Role", "ID"]);
    for user in ctx.auth.users() {
        builder.push_record([
            user.username.clone(),
            user.role.to_string(),
            user.id.clone(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::sharp());
    println!("{table}");
    Ok(())
}

fn run_remove(args: RemoveArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = context::open(global)?;
    ctx.auth.require_admin().into_diagnostic()?;

    let prompt = format!("Permanently delete the user '{}'?", args.username);
    if !confirm(&prompt, args.yes)? {
        println!("Aborted.");
        return Ok(());
    }

    ctx.auth.delete_user(&args.username).into_diagnostic()?;
    println!(
        "{} Deleted user {}",
        style("✓").green(),
        style(&args.username).cyan()
    );
    Ok(())
}
