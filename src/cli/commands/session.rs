//! `sit login` / `sit logout` / `sit whoami` - session handling

use std::io::IsTerminal;

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};
use miette::{IntoDiagnostic, Result};

use crate::cli::args::GlobalOpts;
use crate::cli::context;

#[derive(clap::Args, Debug)]
pub struct LoginArgs {
    /// Username (prompted for when omitted)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Password (prompted for when omitted)
    #[arg(long, short = 'p')]
    pub password: Option<String>,
}

pub fn run_login(args: LoginArgs, global: &GlobalOpts) -> Result<()> {
    let mut ctx = context::open(global)?;
    let interactive = std::io::stdin().is_terminal();

    let username = match args.username {
        Some(username) => username,
        None if interactive => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Username")
            .interact_text()
            .into_diagnostic()?,
        None => return Err(miette::miette!("pass --username when not running in a terminal")),
    };
    let password = match args.password {
        Some(password) => password,
        None if interactive => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()
            .into_diagnostic()?,
        None => return Err(miette::miette!("pass --password when not running in a terminal")),
    };

    let user = ctx.auth.login(&username, &password).into_diagnostic()?;
    println!(
        "{} Logged in as {} ({})",
        style("✓").green(),
        style(&user.username).cyan(),
        user.role
    );
    Ok(())
}

pub fn run_logout(global: &GlobalOpts) -> Result<()> {
    let mut ctx = context::open(global)?;
    ctx.auth.logout();
    println!("{} Logged out", style("✓").green());
    Ok(())
}

pub fn run_whoami(global: &GlobalOpts) -> Result<()> {
    let ctx = context::open(global)?;
    match ctx.auth.current_user() {
        Some(user) => println!("{} ({})", user.username, user.role),
        None => println!("Not logged in."),
    }
    Ok(())
}
