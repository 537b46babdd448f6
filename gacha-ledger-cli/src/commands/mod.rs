pub(crate) mod banners;
pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod games;

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gacha_ledger_scraper::{GameEntry, Registry};

use crate::error::CliError;
use crate::settings::{DataDirSource, Settings};

/// Everything a command needs that is resolved before it runs.
pub(crate) struct AppContext {
    pub settings: Settings,
    pub registry: Registry,
    pub data_dir: PathBuf,
    pub data_dir_source: DataDirSource,
    pub quiet: bool,
}

impl AppContext {
    pub(crate) fn load(
        data_dir: Option<PathBuf>,
        registry: Option<&Path>,
        quiet: bool,
    ) -> Result<Self, CliError> {
        let settings = Settings::load()?;
        let (data_dir, data_dir_source) = settings.resolve_data_dir(data_dir);
        let registry = load_registry(registry)?;
        Ok(Self {
            settings,
            registry,
            data_dir,
            data_dir_source,
            quiet,
        })
    }
}

/// The built-in registry, or the one in `path` when given.
pub(crate) fn load_registry(path: Option<&Path>) -> Result<Registry, CliError> {
    match path {
        Some(p) => {
            let registry = Registry::load(p)?;
            log::debug!("Loaded {} games from {}", registry.games.len(), p.display());
            Ok(registry)
        }
        None => Ok(Registry::builtin()),
    }
}

/// Games selected by an optional alias.
///
/// `None` means every configured game. An unknown alias is reported with the
/// list of valid ones and selects nothing.
pub(crate) fn select_games<'a>(
    registry: &'a Registry,
    game: Option<&str>,
) -> Option<Vec<&'a GameEntry>> {
    let Some(alias) = game else {
        return Some(registry.games.iter().collect());
    };

    match registry.find(alias) {
        Some(entry) => Some(vec![entry]),
        None => {
            log::error!(
                "{} Unknown game '{}'",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                alias,
            );
            log::error!("Valid games: {}", valid_aliases(registry).join(", "));
            None
        }
    }
}

fn valid_aliases(registry: &Registry) -> Vec<String> {
    registry
        .games
        .iter()
        .flat_map(|g| std::iter::once(g.key.clone()).chain(g.aliases.iter().cloned()))
        .collect()
}

/// Single-threaded runtime; every fetch in a run is awaited in turn.
pub(crate) fn build_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::runtime(e.to_string()))
}
