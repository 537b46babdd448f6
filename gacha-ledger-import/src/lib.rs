//! Fold fetched banner observations into the persisted banner histories.
//!
//! This crate owns the reconciliation logic: grouping observations by time
//! window, merging groups into a history under the richer-wins rule, and
//! driving a whole run across games with per-game error isolation.

pub mod group;
pub mod harvest;
pub mod reconcile;
pub mod report;

pub use group::{BannerGroup, NAME_SEPARATOR, group_observations};
pub use harvest::{
    GameError, HarvestOptions, harvest_game, harvest_games, manual_path, refresh_catalogs,
};
pub use reconcile::{
    ReconcileAction, ReconcileDetail, ReconcileOptions, ReconcileResult, ReconcileStats,
    merge_record, reconcile_history, reconcile_store,
};
pub use report::{
    CatalogOutcome, CatalogReport, CategoryOutcome, GameOutcome, GameReport, RunReport,
    RunSummary,
};
