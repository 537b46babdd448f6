use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::json;

use super::*;
use crate::progress::SilentProgress;
use crate::registry::Registry;

/// Serves canned documents by URL; unknown URLs answer 404.
#[derive(Default)]
struct CannedFetcher {
    docs: HashMap<String, Value>,
    requested: RefCell<Vec<String>>,
}

impl CannedFetcher {
    fn with(mut self, url: String, doc: Value) -> Self {
        self.docs.insert(url, doc);
        self
    }
}

impl JsonFetch for CannedFetcher {
    async fn fetch_json(&self, url: &str, _profile: &RequestProfile) -> Result<Value, FetchError> {
        self.requested.borrow_mut().push(url.to_string());
        self.docs.get(url).cloned().ok_or_else(|| FetchError::Http {
            url: url.to_string(),
            status: 404,
        })
    }
}

fn gi() -> GameEntry {
    Registry::builtin().find("gi").unwrap().clone()
}

fn list_doc() -> Value {
    json!({
        "retcode": 0,
        "data": { "list": [
            { "gacha_id": "c1", "gacha_type": 301, "gacha_name": "角色活动祈愿",
              "begin_time": "2024-03-13 18:00:00", "end_time": "2024-04-02 14:59:59" },
            { "gacha_id": "c2", "gacha_type": 400, "gacha_name": "角色活动祈愿-2",
              "begin_time": "2024-03-13 18:00:00", "end_time": "2024-04-02 14:59:59" },
            { "gacha_id": "w1", "gacha_type": 302, "gacha_name": "武器活动祈愿",
              "begin_time": "2024-03-13 18:00:00", "end_time": "2024-04-02 14:59:59" },
            { "gacha_id": "", "gacha_type": 301, "gacha_name": "无ID" },
            { "gacha_id": "s1", "gacha_type": 200, "gacha_name": "常驻祈愿" }
        ]}
    })
}

#[tokio::test]
async fn list_is_fetched_and_parsed() {
    let game = gi();
    let fetcher = CannedFetcher::default().with(game.gacha_list_url(), list_doc());
    let list = fetch_banner_list(&fetcher, &game).await.unwrap();
    assert_eq!(list.len(), 5);
}

#[tokio::test]
async fn list_with_bad_retcode_fails() {
    let game = gi();
    let fetcher = CannedFetcher::default().with(game.gacha_list_url(), json!({ "retcode": 1 }));
    let err = fetch_banner_list(&fetcher, &game).await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidUpstreamShape(_)));
}

#[tokio::test]
async fn character_category_fetches_matching_banners_in_order() {
    let game = gi();
    let fetcher = CannedFetcher::default()
        .with(
            game.gacha_detail_url("c1"),
            json!({
                "title": "角色活动祈愿「<b>鹤与白兔的诉说</b>」",
                "r5_up_items": [{ "item_name": "闲云" }],
                "r4_up_items": [{ "item_name": "嘉明" }]
            }),
        )
        .with(
            game.gacha_detail_url("c2"),
            json!({
                "title": "<p>月草的赐慧</p>",
                "r5_up_items": [{ "item_name": "纳西妲" }],
                "r4_up_items": [{ "item_name": "嘉明" }]
            }),
        );
    let list = parse_gacha_list(&list_doc()).unwrap();

    let fetch = fetch_category(&fetcher, &game, &list, Category::Character, &SilentProgress).await;

    assert_eq!(fetch.matched, 3);
    assert_eq!(fetch.skipped, 1);
    assert!(fetch.failures.is_empty());
    assert_eq!(fetch.observations.len(), 2);
    assert_eq!(fetch.observations[0].display_name, "鹤与白兔的诉说");
    assert_eq!(fetch.observations[1].display_name, "月草的赐慧");
    assert_eq!(fetch.observations[0].up_items.five, vec!["闲云"]);
    assert_eq!(
        fetch.observations[0].time_range,
        TimeRange::new("2024-03-13 18:00:00", "2024-04-02 14:59:59")
    );
    assert_eq!(
        *fetcher.requested.borrow(),
        vec![game.gacha_detail_url("c1"), game.gacha_detail_url("c2")]
    );
}

#[tokio::test]
async fn failed_detail_is_reported_and_excluded() {
    let game = gi();
    let fetcher = CannedFetcher::default().with(
        game.gacha_detail_url("c2"),
        json!({ "r5_up_items": [{ "item_name": "纳西妲" }] }),
    );
    let list = parse_gacha_list(&list_doc()).unwrap();

    let fetch = fetch_category(&fetcher, &game, &list, Category::Character, &SilentProgress).await;

    assert_eq!(fetch.observations.len(), 1);
    assert_eq!(fetch.observations[0].display_name, "角色活动祈愿-2");
    assert_eq!(fetch.failures.len(), 1);
    assert_eq!(fetch.failures[0].banner, "角色活动祈愿");
    assert!(matches!(fetch.failures[0].error, FetchError::Http { status: 404, .. }));
}

#[tokio::test]
async fn banner_without_times_is_a_failure_without_request() {
    let game = gi();
    let fetcher = CannedFetcher::default();
    let list = vec![GachaListEntry {
        gacha_id: Some("w9".into()),
        gacha_type: Some(302),
        gacha_name: Some("武器".into()),
        ..Default::default()
    }];

    let fetch = fetch_category(&fetcher, &game, &list, Category::Weapon, &SilentProgress).await;

    assert!(fetch.observations.is_empty());
    assert!(matches!(fetch.failures[0].error, FetchError::InvalidUpstreamShape(_)));
    assert!(fetcher.requested.borrow().is_empty());
}

#[tokio::test]
async fn no_matching_banners_is_empty_fetch() {
    let game = gi();
    let fetcher = CannedFetcher::default();
    let list = vec![GachaListEntry {
        gacha_id: Some("s1".into()),
        gacha_type: Some(200),
        ..Default::default()
    }];

    let fetch = fetch_category(&fetcher, &game, &list, Category::Weapon, &SilentProgress).await;
    assert_eq!(fetch.matched, 0);
    assert!(fetch.observations.is_empty());
}
