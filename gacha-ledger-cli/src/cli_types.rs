//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gacha-ledger")]
#[command(
    about = "Keep gacha banner histories and character/weapon catalogs up to date",
    long_about = None
)]
pub(crate) struct Cli {
    /// Data directory holding manual/ and hakush/ (overrides GACHA_LEDGER_DATA_DIR and settings)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Use a TOML game registry instead of the built-in one
    #[arg(long, global = true)]
    pub registry: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Fetch current banners and merge them into the banner histories
    Banners {
        /// Game key or alias (e.g. gi, hsr, zzz, starrail). All games when omitted
        game: Option<String>,

        /// Show what would change without writing history files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Also write a plain-text run report to this file
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Refresh the character and weapon catalog mirrors
    Catalog {
        /// Game key or alias. All games when omitted
        game: Option<String>,
    },

    /// List configured games and their aliases
    Games,

    /// Show settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show effective settings and where each value comes from
    Show,

    /// Print the settings file path
    Path,
}
