//! Rate-up item extraction from banner detail documents.

use gacha_ledger_catalog::UpItems;
use serde_json::Value;

use crate::registry::UpFields;

/// Attribute holding an item's display name inside an up-item entry.
const ITEM_NAME_KEY: &str = "item_name";

/// Pull the five- and four-star up items out of a detail document.
///
/// Field names differ per game, and older banners lack some fields entirely,
/// so a missing or non-array field yields an empty tier rather than an error.
pub fn extract_up_items(detail: &Value, fields: &UpFields) -> UpItems {
    let five = item_names(detail, &fields.five_star);
    let four = item_names(detail, &fields.four_star);
    log::debug!("  5★ up: {:?}", five);
    log::debug!("  4★ up: {:?}", four);
    UpItems { five, four }
}

/// Names of the entries under `field` that carry a non-empty `item_name`,
/// in document order.
fn item_names(detail: &Value, field: &str) -> Vec<String> {
    let Some(items) = detail.get(field).and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| item.get(ITEM_NAME_KEY).and_then(Value::as_str))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
