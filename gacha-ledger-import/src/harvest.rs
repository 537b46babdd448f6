//! Per-game harvest driver.
//!
//! Games run one after another. Within a game the banner list is fetched once,
//! then each category is fetched and reconciled against its history file.
//! A list failure aborts that game only; a store failure aborts that category
//! only.

use std::path::{Path, PathBuf};

use gacha_ledger_catalog::{Category, HistoryStore};
use gacha_ledger_scraper::{
    CatalogError, FetchError, GameEntry, HarvestProgress, JsonFetch, MirrorSummary,
    fetch_banner_list, fetch_category, refresh_mirror,
};
use thiserror::Error;

use crate::reconcile::{ReconcileOptions, reconcile_store};
use crate::report::{
    CatalogOutcome, CatalogReport, CategoryOutcome, GameOutcome, GameReport, RunReport,
};

/// Errors that abort one game's harvest.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("banner list for {game} unavailable: {source}")]
    List {
        game: String,
        #[source]
        source: FetchError,
    },
}

/// Options for a harvest run.
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    /// Root of the data directory (`manual/` and `hakush/` live below it).
    pub data_dir: PathBuf,
    pub dry_run: bool,
}

/// History file for one game and category.
pub fn manual_path(data_dir: &Path, game: &GameEntry, category: Category) -> PathBuf {
    data_dir
        .join("manual")
        .join(&game.banner_config(category).manual_file)
}

/// Harvest every category of one game.
pub async fn harvest_game<F: JsonFetch>(
    fetcher: &F,
    game: &GameEntry,
    options: &HarvestOptions,
    progress: &dyn HarvestProgress,
) -> Result<GameReport, GameError> {
    progress.on_phase(&format!("{}: fetching banner list", game.name));
    let list = fetch_banner_list(fetcher, game)
        .await
        .map_err(|source| GameError::List {
            game: game.key.clone(),
            source,
        })?;
    log::debug!("  {} banners listed for {}", list.len(), game.name);

    let reconcile_options = ReconcileOptions {
        dry_run: options.dry_run,
    };
    let mut categories = Vec::with_capacity(Category::ALL.len());

    for category in Category::ALL {
        progress.on_phase(&format!("{}: {} banners", game.name, category));
        let fetch = fetch_category(fetcher, game, &list, category, progress).await;
        let store = HistoryStore::new(manual_path(&options.data_dir, game, category));

        let reconcile = if fetch.observations.is_empty() {
            log::info!(
                "  No {} observations for {}, leaving {} as is",
                category,
                game.name,
                store.path().display()
            );
            None
        } else {
            let result = reconcile_store(&store, &fetch.observations, &reconcile_options);
            if let Err(e) = &result {
                log::error!("  {} {} history not updated: {}", game.name, category, e);
            }
            Some(result)
        };

        categories.push(CategoryOutcome {
            category,
            store_path: store.path().to_path_buf(),
            observed: fetch.observations.len(),
            skipped: fetch.skipped,
            failures: fetch.failures,
            reconcile,
        });
    }

    progress.on_complete(&format!("{}: done", game.name));
    Ok(GameReport { categories })
}

/// Harvest each game in turn, collecting one outcome per game.
pub async fn harvest_games<F: JsonFetch>(
    fetcher: &F,
    games: &[&GameEntry],
    options: &HarvestOptions,
    progress: &dyn HarvestProgress,
) -> RunReport {
    let mut report = RunReport::default();

    for game in games {
        log::info!("Processing {} ({})", game.name, game.key);
        let result = harvest_game(fetcher, game, options, progress).await;
        if let Err(e) = &result {
            log::error!("Skipping {}: {}", game.name, e);
        }
        report.games.push(GameOutcome {
            key: game.key.clone(),
            name: game.name.clone(),
            result,
        });
    }

    report
}

/// Refresh every catalog mirror of each game. One failing menu does not stop
/// the others.
pub async fn refresh_catalogs<F: JsonFetch>(
    fetcher: &F,
    games: &[&GameEntry],
    data_dir: &Path,
    progress: &dyn HarvestProgress,
) -> CatalogReport {
    let mut report = CatalogReport::default();

    for game in games {
        progress.on_phase(&format!("{}: refreshing catalog", game.name));
        for menu in &game.catalog_menus {
            let result: Result<MirrorSummary, CatalogError> =
                refresh_mirror(fetcher, game, menu, data_dir).await;
            match &result {
                Ok(summary) => log::info!(
                    "  Wrote {} {} entries to {}",
                    summary.entries,
                    summary.category,
                    summary.path.display()
                ),
                Err(e) => log::error!("  {} catalog {} failed: {}", game.name, menu.menu_id, e),
            }
            report.menus.push(CatalogOutcome {
                game: game.key.clone(),
                menu_id: menu.menu_id.clone(),
                result,
            });
        }
        progress.on_complete(&format!("{}: catalog done", game.name));
    }

    report
}
