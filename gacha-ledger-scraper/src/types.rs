use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::FetchError;

/// Status code the gacha list endpoint uses for success.
pub const RETCODE_OK: i64 = 0;

/// One banner from the gacha list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GachaListEntry {
    #[serde(default)]
    pub gacha_id: Option<String>,
    /// Banner type id. Some regions send it as a numeric string.
    #[serde(default, deserialize_with = "lenient_type_id")]
    pub gacha_type: Option<i64>,
    #[serde(default)]
    pub gacha_name: Option<String>,
    #[serde(default)]
    pub begin_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl GachaListEntry {
    /// The id to request details with, if the banner has a usable one.
    pub fn detail_id(&self) -> Option<&str> {
        self.gacha_id.as_deref().filter(|id| !id.is_empty())
    }

    /// A label for log lines.
    pub fn label(&self) -> &str {
        self.gacha_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.detail_id())
            .unwrap_or("未知")
    }
}

/// Pull the banner list out of a list response.
///
/// The response must carry `retcode == 0` and an array at `data.list`.
/// Entries that do not look like banners are skipped with a warning.
pub fn parse_gacha_list(response: &Value) -> Result<Vec<GachaListEntry>, FetchError> {
    let retcode = response.get("retcode").and_then(Value::as_i64);
    if retcode != Some(RETCODE_OK) {
        let message = response
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no message");
        return Err(FetchError::invalid_shape(format!(
            "banner list retcode {} ({})",
            retcode.map_or_else(|| "missing".to_string(), |c| c.to_string()),
            message
        )));
    }

    let list = response
        .pointer("/data/list")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::invalid_shape("banner list has no data.list array"))?;

    let mut entries = Vec::with_capacity(list.len());
    for (i, raw) in list.iter().enumerate() {
        match GachaListEntry::deserialize(raw) {
            Ok(entry) => entries.push(entry),
            Err(e) => log::warn!("Skipping malformed banner list entry #{}: {}", i, e),
        }
    }
    Ok(entries)
}

fn lenient_type_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
