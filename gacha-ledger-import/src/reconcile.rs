//! Banner history reconciliation.
//!
//! Observations from one fetch pass are grouped by time window and merged
//! into the persisted history for one game and category. A window not yet in
//! the history is appended. A window already present is replaced only when the
//! incoming group lists strictly more five-star items than the stored record,
//! and the stored record lists at least one.
//!
//! The second condition means a stored record with an empty five-star list is
//! never upgraded by a pass, even a richer one. Such records have to be fixed
//! by hand.

use gacha_ledger_catalog::{BannerObservation, BannerRecord, HistoryStore, StoreError, sort_history};

use crate::group::{BannerGroup, group_observations};

/// Options controlling a reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    /// Report without writing the history file.
    pub dry_run: bool,
}

/// What happened to one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// No record for the window existed; a new one was added.
    Appended,
    /// The stored record was replaced by a richer one.
    Replaced { previous_five: usize },
    /// The stored record was kept and the group discarded.
    Unchanged,
}

/// Statistics from a reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub groups: usize,
    pub appended: usize,
    pub replaced: usize,
    pub unchanged: usize,
}

impl ReconcileStats {
    fn record(&mut self, action: ReconcileAction) {
        self.groups += 1;
        match action {
            ReconcileAction::Appended => self.appended += 1,
            ReconcileAction::Replaced { .. } => self.replaced += 1,
            ReconcileAction::Unchanged => self.unchanged += 1,
        }
    }

    /// Whether the pass changed the history.
    pub fn changed(&self) -> bool {
        self.appended > 0 || self.replaced > 0
    }
}

/// Detail for a single group (used for CLI output).
#[derive(Debug, Clone)]
pub struct ReconcileDetail {
    pub from: String,
    pub to: String,
    pub name: String,
    pub five: usize,
    pub action: ReconcileAction,
}

/// Result of a reconciliation pass including stats and per-group details.
#[derive(Debug, Clone)]
pub struct ReconcileResult {
    pub stats: ReconcileStats,
    pub details: Vec<ReconcileDetail>,
    /// Number of records in the history after the pass.
    pub total_records: usize,
}

/// Merge one incoming record into `history`.
pub fn merge_record(
    history: &mut Vec<BannerRecord>,
    mut incoming: BannerRecord,
) -> ReconcileAction {
    let range = incoming.time_range();
    let existing = history.iter().position(|r| r.covers(&range));

    match existing {
        None => {
            history.push(incoming);
            ReconcileAction::Appended
        }
        Some(i) => {
            let previous_five = history[i].five.len();
            if previous_five > 0 && incoming.five.len() > previous_five {
                incoming.extra = std::mem::take(&mut history[i].extra);
                history[i] = incoming;
                ReconcileAction::Replaced { previous_five }
            } else {
                ReconcileAction::Unchanged
            }
        }
    }
}

/// Merge every group into `history`, then sort it newest first.
pub fn reconcile_history(
    history: &mut Vec<BannerRecord>,
    groups: &[BannerGroup],
) -> ReconcileResult {
    let mut stats = ReconcileStats::default();
    let mut details = Vec::with_capacity(groups.len());

    for group in groups {
        let record = group.to_record();
        let detail_name = record.name.clone();
        let five = record.five.len();
        let action = merge_record(history, record);

        match action {
            ReconcileAction::Appended => {
                log::info!("  Appended {} ({})", detail_name, group.time_range);
            }
            ReconcileAction::Replaced { previous_five } => {
                log::info!(
                    "  Replaced {} ({}): 5★ {} -> {}",
                    detail_name,
                    group.time_range,
                    previous_five,
                    five
                );
            }
            ReconcileAction::Unchanged => {
                log::debug!("  Kept existing record for {}", group.time_range);
            }
        }

        stats.record(action);
        details.push(ReconcileDetail {
            from: group.time_range.from.clone(),
            to: group.time_range.to.clone(),
            name: detail_name,
            five,
            action,
        });
    }

    sort_history(history);

    ReconcileResult {
        stats,
        details,
        total_records: history.len(),
    }
}

/// Run a full pass against a history file: group, load, merge, sort, save.
///
/// Load and save failures abort this pass only. With `dry_run` the file is
/// read but never written.
pub fn reconcile_store(
    store: &HistoryStore,
    observations: &[BannerObservation],
    options: &ReconcileOptions,
) -> Result<ReconcileResult, StoreError> {
    let groups = group_observations(observations);
    let mut history = store.load()?;
    log::debug!(
        "  Loaded {} records from {}",
        history.len(),
        store.path().display()
    );

    let result = reconcile_history(&mut history, &groups);

    if options.dry_run {
        log::info!("  Dry run: {} not written", store.path().display());
    } else {
        store.save(&history)?;
        log::info!("  Updated {}", store.path().display());
    }

    Ok(result)
}
