use clap::Parser;
use miette::Result;
use sit::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for beautiful diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .wrap_lines(false)
                .build(),
        )
    }))?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Report(cmd) => sit::cli::commands::report::run(cmd, &cli.global),
        Commands::Stock(cmd) => sit::cli::commands::stock::run(cmd, &cli.global),
        Commands::Import(args) => sit::cli::commands::import_cmd::run(args, &cli.global),
        Commands::Export(cmd) => sit::cli::commands::export::run(cmd, &cli.global),
        Commands::User(cmd) => sit::cli::commands::user::run(cmd, &cli.global),
        Commands::Login(args) => sit::cli::commands::session::run_login(args, &cli.global),
        Commands::Logout => sit::cli::commands::session::run_logout(&cli.global),
        Commands::Whoami => sit::cli::commands::session::run_whoami(&cli.global),
        Commands::Completions(args) => sit::cli::commands::completions::run(args),
    }
}
