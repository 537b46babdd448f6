//! gacha-ledger CLI
//!
//! Keeps hand-maintained gacha banner histories up to date and mirrors the
//! character and weapon catalogs they refer to.

mod cli_types;
mod commands;
mod error;
mod logging;
mod settings;
mod spinner;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use cli_types::{Cli, Commands, ConfigAction};
use commands::AppContext;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Commands::Config {
        action: ConfigAction::Path,
    } = cli.command
    {
        commands::config::run_config_path();
        return Ok(());
    }

    let ctx = AppContext::load(cli.data_dir, cli.registry.as_deref(), cli.quiet)?;

    match cli.command {
        Commands::Banners {
            game,
            dry_run,
            report,
        } => commands::banners::run_banners(&ctx, game, dry_run, report)?,
        Commands::Catalog { game } => commands::catalog::run_catalog(&ctx, game)?,
        Commands::Games => commands::games::run_games(&ctx.registry),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&ctx),
            ConfigAction::Path => commands::config::run_config_path(),
        },
    }

    Ok(())
}
