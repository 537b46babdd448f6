//! Data model types for banner histories.
//!
//! These types represent one fetched banner ([`BannerObservation`]) and one
//! persisted history entry ([`BannerRecord`]), plus the small value types
//! they share.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ── Category ────────────────────────────────────────────────────────────────

/// The item class a banner promotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Character,
    Weapon,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Character, Category::Weapon];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Weapon => "weapon",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Time range ──────────────────────────────────────────────────────────────

/// A banner's active window, as the upstream reports it.
///
/// Both ends are kept as the exact upstream strings. Two ranges are the same
/// banner window only if both strings match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeRange {
    pub from: String,
    pub to: String,
}

impl TimeRange {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ~ {}", self.from, self.to)
    }
}

// ── Observation ─────────────────────────────────────────────────────────────

/// Rate-up item names for the two tracked rarity tiers, in upstream order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpItems {
    pub five: Vec<String>,
    pub four: Vec<String>,
}

/// One banner as seen during a single fetch pass. Never persisted directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerObservation {
    pub time_range: TimeRange,
    pub up_items: UpItems,
    pub display_name: String,
}

// ── Record ──────────────────────────────────────────────────────────────────

/// One entry of a persisted banner history file.
///
/// Field order here is the field order on disk. Hand-curated entries may omit
/// the item lists or the name, and any keys not listed here are kept in
/// `extra` and written back after the known ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerRecord {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub five: Vec<String>,
    #[serde(default)]
    pub four: Vec<String>,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_yml::Mapping,
}

impl BannerRecord {
    pub fn time_range(&self) -> TimeRange {
        TimeRange::new(self.from.clone(), self.to.clone())
    }

    /// Whether this record covers exactly the given window.
    pub fn covers(&self, range: &TimeRange) -> bool {
        self.from == range.from && self.to == range.to
    }

    /// The start of the window as a timestamp, if `from` is a recognizable date.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        parse_banner_time(&self.from)
    }
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an upstream banner timestamp.
///
/// Accepts the `2024-01-01 10:00:00` form the gacha endpoints use, a few close
/// variants, RFC 3339, and bare dates (taken as midnight).
pub fn parse_banner_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upstream_format() {
        let dt = parse_banner_time("2024-03-01 18:00:00").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "2024-03-01 18:00");
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let dt = parse_banner_time("2023-12-01").unwrap();
        assert_eq!(dt.format("%H:%M:%S").to_string(), "00:00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_banner_time("").is_none());
        assert!(parse_banner_time("soon").is_none());
    }

    #[test]
    fn record_covers_exact_range_only() {
        let record = BannerRecord {
            from: "2024-01-01 10:00:00".into(),
            to: "2024-01-21 17:59:59".into(),
            five: vec![],
            four: vec![],
            name: String::new(),
            extra: Default::default(),
        };
        assert!(record.covers(&record.time_range()));
        assert!(!record.covers(&TimeRange::new("2024-01-01 10:00:00", "2024-01-21 18:00:00")));
    }

    #[test]
    fn category_serializes_lowercase() {
        assert_eq!(Category::Weapon.to_string(), "weapon");
        assert_eq!(Category::ALL.len(), 2);
    }
}
