//! Banner list and detail fetching.
//!
//! One list request per game, then one detail request per banner whose type
//! belongs to the category being harvested. Everything runs in list order,
//! one request at a time.

use gacha_ledger_catalog::{BannerObservation, Category, TimeRange, resolve_banner_name};
use serde_json::Value;

use crate::client::{JsonFetch, RequestProfile};
use crate::error::FetchError;
use crate::extract::extract_up_items;
use crate::progress::HarvestProgress;
use crate::registry::GameEntry;
use crate::types::{GachaListEntry, parse_gacha_list};

/// A banner whose details could not be turned into an observation.
#[derive(Debug)]
pub struct BannerFailure {
    pub banner: String,
    pub error: FetchError,
}

/// Observations gathered for one category of one game.
#[derive(Debug)]
pub struct CategoryFetch {
    pub category: Category,
    /// List entries whose type belongs to this category.
    pub matched: usize,
    /// Matched entries skipped for lack of an id.
    pub skipped: usize,
    pub observations: Vec<BannerObservation>,
    pub failures: Vec<BannerFailure>,
}

/// Fetch and validate a game's banner list.
pub async fn fetch_banner_list<F: JsonFetch>(
    fetcher: &F,
    game: &GameEntry,
) -> Result<Vec<GachaListEntry>, FetchError> {
    let response = fetcher
        .fetch_json(&game.gacha_list_url(), &RequestProfile::gacha())
        .await?;
    parse_gacha_list(&response)
}

/// Fetch details for every banner in `list` that belongs to `category`.
///
/// Never fails as a whole: a banner without an id is skipped, and a banner
/// whose details cannot be fetched is recorded in `failures` and left out.
pub async fn fetch_category<F: JsonFetch>(
    fetcher: &F,
    game: &GameEntry,
    list: &[GachaListEntry],
    category: Category,
    progress: &dyn HarvestProgress,
) -> CategoryFetch {
    let config = game.banner_config(category);
    let targets: Vec<&GachaListEntry> = list
        .iter()
        .filter(|b| {
            b.gacha_type
                .is_some_and(|t| config.banner_types.contains(&t))
        })
        .collect();

    let mut fetch = CategoryFetch {
        category,
        matched: targets.len(),
        skipped: 0,
        observations: Vec::with_capacity(targets.len()),
        failures: Vec::new(),
    };

    if targets.is_empty() {
        log::info!(
            "  No {} banners of type {:?} in the list",
            category,
            config.banner_types
        );
        return fetch;
    }
    log::info!("  Found {} {} banners", targets.len(), category);

    let total = targets.len();
    for (i, banner) in targets.into_iter().enumerate() {
        progress.on_banner(i + 1, total, banner.label());

        let Some(id) = banner.detail_id() else {
            log::debug!("  Skipping banner without id: {}", banner.label());
            fetch.skipped += 1;
            continue;
        };

        match fetch_observation(fetcher, game, banner, id).await {
            Ok(observation) => fetch.observations.push(observation),
            Err(e) => {
                log::error!("  Failed to fetch {}: {}", banner.label(), e);
                fetch.failures.push(BannerFailure {
                    banner: banner.label().to_string(),
                    error: e,
                });
            }
        }
    }

    fetch
}

async fn fetch_observation<F: JsonFetch>(
    fetcher: &F,
    game: &GameEntry,
    banner: &GachaListEntry,
    id: &str,
) -> Result<BannerObservation, FetchError> {
    let (from, to) = match (non_empty(&banner.begin_time), non_empty(&banner.end_time)) {
        (Some(from), Some(to)) => (from, to),
        _ => {
            return Err(FetchError::invalid_shape(format!(
                "banner {} has no begin_time/end_time",
                id
            )));
        }
    };

    let detail = fetcher
        .fetch_json(&game.gacha_detail_url(id), &RequestProfile::gacha())
        .await?;

    log::debug!(
        "  {} fields: {}={}, {}={}",
        game.name,
        game.up_fields.five_star,
        presence(&detail, &game.up_fields.five_star),
        game.up_fields.four_star,
        presence(&detail, &game.up_fields.four_star),
    );

    let up_items = extract_up_items(&detail, &game.up_fields);
    let display_name = resolve_banner_name(
        detail.get("title").and_then(Value::as_str),
        banner.gacha_name.as_deref(),
    );

    Ok(BannerObservation {
        time_range: TimeRange::new(from, to),
        up_items,
        display_name,
    })
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

fn presence(detail: &Value, field: &str) -> &'static str {
    if detail.get(field).is_some() {
        "present"
    } else {
        "absent"
    }
}

#[cfg(test)]
#[path = "tests/banners_tests.rs"]
mod tests;
