use std::path::{Path, PathBuf};

use gacha_ledger_catalog::{Category, StoreError};
use gacha_ledger_scraper::{BannerFailure, CatalogError, MirrorSummary};

use crate::harvest::GameError;
use crate::reconcile::ReconcileResult;

/// What happened to one category of one game.
#[derive(Debug)]
pub struct CategoryOutcome {
    pub category: Category,
    pub store_path: PathBuf,
    /// Banners that produced an observation.
    pub observed: usize,
    /// Matching banners skipped for lack of an id.
    pub skipped: usize,
    pub failures: Vec<BannerFailure>,
    /// `None` when nothing was observed and the history was left alone.
    pub reconcile: Option<Result<ReconcileResult, StoreError>>,
}

/// All categories of one game that got past the banner list.
#[derive(Debug, Default)]
pub struct GameReport {
    pub categories: Vec<CategoryOutcome>,
}

#[derive(Debug)]
pub struct GameOutcome {
    pub key: String,
    pub name: String,
    pub result: Result<GameReport, GameError>,
}

/// Collects the outcome of every game in a banner run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub games: Vec<GameOutcome>,
}

impl RunReport {
    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for game in &self.games {
            let report = match &game.result {
                Ok(report) => report,
                Err(_) => {
                    summary.games_failed += 1;
                    continue;
                }
            };
            summary.games_ok += 1;
            for category in &report.categories {
                summary.observed += category.observed;
                summary.skipped += category.skipped;
                summary.banner_failures += category.failures.len();
                match &category.reconcile {
                    Some(Ok(result)) => {
                        summary.appended += result.stats.appended;
                        summary.replaced += result.stats.replaced;
                        summary.unchanged += result.stats.unchanged;
                    }
                    Some(Err(_)) => summary.store_failures += 1,
                    None => {}
                }
            }
        }
        summary
    }

    /// Write a plain-text report of the run.
    pub fn write_to_file(&self, path: &Path) -> std::io::Result<()> {
        use std::io::Write;

        let mut file = std::fs::File::create(path)?;
        let summary = self.summary();

        writeln!(file, "=== Banner Run ===")?;
        writeln!(
            file,
            "Date: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file)?;
        writeln!(file, "--- Summary ---")?;
        writeln!(
            file,
            "Games: {} ok, {} failed",
            summary.games_ok, summary.games_failed
        )?;
        writeln!(
            file,
            "Records: {} appended, {} replaced, {} unchanged",
            summary.appended, summary.replaced, summary.unchanged
        )?;
        writeln!(file, "Banner failures: {}", summary.banner_failures)?;
        writeln!(file, "Store failures: {}", summary.store_failures)?;
        writeln!(file)?;
        writeln!(file, "--- Details ---")?;
        writeln!(file)?;

        for game in &self.games {
            let report = match &game.result {
                Ok(report) => report,
                Err(e) => {
                    writeln!(file, "[ERROR] {}: {}", game.name, e)?;
                    continue;
                }
            };
            writeln!(file, "[OK] {}", game.name)?;
            for category in &report.categories {
                match &category.reconcile {
                    Some(Ok(result)) => writeln!(
                        file,
                        "     {}: {} observed, +{} appended, {} replaced -> {}",
                        category.category,
                        category.observed,
                        result.stats.appended,
                        result.stats.replaced,
                        category.store_path.display()
                    )?,
                    Some(Err(e)) => {
                        writeln!(file, "     {}: store error: {}", category.category, e)?
                    }
                    None => writeln!(file, "     {}: nothing observed", category.category)?,
                }
                for failure in &category.failures {
                    writeln!(file, "     Failed: {}: {}", failure.banner, failure.error)?;
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub games_ok: usize,
    pub games_failed: usize,
    pub observed: usize,
    pub skipped: usize,
    pub appended: usize,
    pub replaced: usize,
    pub unchanged: usize,
    pub banner_failures: usize,
    pub store_failures: usize,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        self.games_failed > 0 || self.banner_failures > 0 || self.store_failures > 0
    }
}

#[derive(Debug)]
pub struct CatalogOutcome {
    pub game: String,
    pub menu_id: String,
    pub result: Result<MirrorSummary, CatalogError>,
}

/// Outcome of every catalog menu refreshed in a run.
#[derive(Debug, Default)]
pub struct CatalogReport {
    pub menus: Vec<CatalogOutcome>,
}

impl CatalogReport {
    pub fn written(&self) -> usize {
        self.menus.iter().filter(|m| m.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.menus.len() - self.written()
    }
}
