//! Character and weapon catalog mirrors.
//!
//! The catalog API serves one document per game and menu, keyed by internal
//! id. The mirror re-keys every entry by its Chinese display name and keeps a
//! flat set of attributes. There is no merging: each refresh replaces the
//! mirror file outright.

use std::path::{Path, PathBuf};

use gacha_ledger_catalog::Category;
use serde::Serialize;
use serde::ser::Serializer;
use serde_json::Value;
use thiserror::Error;

use crate::client::{JsonFetch, RequestProfile};
use crate::error::FetchError;
use crate::registry::{CatalogMenu, GameEntry};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One mirrored catalog entry.
///
/// Fields are declared in the order the mirror files list them
/// (case-insensitive alphabetical). Nested objects copied from upstream are
/// written in the same key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogEntry {
    #[serde(rename = "baseType", skip_serializing_if = "Option::is_none")]
    #[serde(serialize_with = "sorted_value")]
    pub base_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "sorted_value")]
    pub cn: Option<Value>,
    #[serde(rename = "damageType", skip_serializing_if = "Option::is_none")]
    #[serde(serialize_with = "sorted_value")]
    pub damage_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "sorted_value")]
    pub element: Option<Value>,
    #[serde(rename = "EN", skip_serializing_if = "Option::is_none")]
    #[serde(serialize_with = "sorted_value")]
    pub en: Option<Value>,
    #[serde(rename = "iconUrl", skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "sorted_value")]
    pub rank: Option<Value>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[serde(serialize_with = "sorted_value")]
    pub item_type: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "sorted_value")]
    pub weapon: Option<Value>,
}

/// Serializes a JSON value with object keys in case-insensitive order, at
/// every depth.
struct CaseInsensitive<'a>(&'a Value);

impl Serialize for CaseInsensitive<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => {
                let mut fields: Vec<(&String, &Value)> = map.iter().collect();
                fields.sort_by_key(|(k, _)| k.to_lowercase());
                serializer.collect_map(fields.into_iter().map(|(k, v)| (k, CaseInsensitive(v))))
            }
            Value::Array(items) => serializer.collect_seq(items.iter().map(CaseInsensitive)),
            other => other.serialize(serializer),
        }
    }
}

fn sorted_value<S: Serializer>(value: &Option<Value>, serializer: S) -> Result<S::Ok, S::Error> {
    value.as_ref().map(CaseInsensitive).serialize(serializer)
}

/// A projected catalog: display name → entry, sorted case-insensitively by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogMirror {
    entries: Vec<(String, CatalogEntry)>,
}

impl CatalogMirror {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    /// Render as tab-indented JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        // serde_json only ever emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Serialize for CatalogMirror {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

/// Summary of one mirror refresh.
#[derive(Debug, Clone)]
pub struct MirrorSummary {
    pub category: Category,
    pub menu_id: String,
    pub entries: usize,
    pub path: PathBuf,
}

/// Project an upstream catalog document into a mirror.
///
/// Entries with neither a `CHS` nor a `cn` name are dropped. When two entries
/// share a name, the one with the higher numeric id wins.
pub fn project_catalog(
    document: &Value,
    catalog_key: &str,
    category: Category,
) -> Result<CatalogMirror, FetchError> {
    let object = document
        .as_object()
        .ok_or_else(|| FetchError::invalid_shape("catalog document is not an object"))?;

    // Numeric ids first in numeric order, then the rest in key order.
    let mut items: Vec<(&String, &Value)> = object.iter().collect();
    items.sort_by_key(|(id, _)| (id.parse::<u64>().map_err(|_| ()), *id));

    let mut entries: Vec<(String, CatalogEntry)> = Vec::with_capacity(items.len());
    for (id, item) in items {
        let Some(name) = first_text(item, &["CHS", "cn"]) else {
            log::warn!("  Catalog entry {} has no Chinese name, skipping", id);
            continue;
        };
        let entry = CatalogEntry {
            base_type: item.get("baseType").cloned(),
            cn: first_truthy(item, &["cn", "CHS"]),
            damage_type: item.get("damageType").cloned(),
            element: item.get("element").cloned(),
            en: first_truthy(item, &["EN", "en"]),
            icon_url: icon_url(catalog_key, category, id, item),
            id: id.clone(),
            rank: item.get("rank").cloned(),
            item_type: item.get("type").cloned(),
            weapon: item.get("weapon").cloned(),
        };
        match entries.iter_mut().find(|slot| slot.0 == name) {
            Some(slot) => slot.1 = entry,
            None => entries.push((name, entry)),
        }
    }

    entries.sort_by_key(|(name, _)| name.to_lowercase());
    Ok(CatalogMirror { entries })
}

/// Icon path for an entry.
///
/// Star Rail icons are addressed by id in per-category folders; the other
/// games name the icon file in the entry itself. Role icons point at the
/// "select" variant.
pub fn icon_url(catalog_key: &str, category: Category, id: &str, item: &Value) -> Option<String> {
    let url = if catalog_key == "hsr" {
        let folder = match category {
            Category::Weapon => "lightconemediumicon",
            Category::Character => "avatarshopicon",
        };
        format!("/{catalog_key}/UI/{folder}/{id}.webp")
    } else {
        let icon = item.get("icon").and_then(scalar_text)?;
        format!("/{catalog_key}/UI/{icon}.webp")
    };
    Some(url.replacen("IconRole", "IconRoleSelect", 1))
}

/// Mirror file location under the data directory.
pub fn mirror_path(data_dir: &Path, catalog_key: &str, category: Category) -> PathBuf {
    data_dir
        .join("hakush")
        .join(catalog_key)
        .join(format!("{}.json", category))
}

/// Write a mirror whole, via a temp file and rename.
pub fn write_mirror(path: &Path, mirror: &CatalogMirror) -> Result<(), CatalogError> {
    let io_err = |e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    };
    let json = mirror.to_json()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}

/// Fetch, project, and write one menu's mirror.
pub async fn refresh_mirror<F: JsonFetch>(
    fetcher: &F,
    game: &GameEntry,
    menu: &CatalogMenu,
    data_dir: &Path,
) -> Result<MirrorSummary, CatalogError> {
    let document = fetcher
        .fetch_json(&game.catalog_url(&menu.menu_id), &RequestProfile::catalog())
        .await?;
    let mirror = project_catalog(&document, &game.catalog_key, menu.category)?;
    let path = mirror_path(data_dir, &game.catalog_key, menu.category);
    write_mirror(&path, &mirror)?;

    Ok(MirrorSummary {
        category: menu.category,
        menu_id: menu.menu_id.clone(),
        entries: mirror.len(),
        path,
    })
}

/// First of `keys` whose value is truthy (non-null, non-empty, non-zero, non-false).
fn first_truthy(item: &Value, keys: &[&str]) -> Option<Value> {
    keys.iter()
        .filter_map(|k| item.get(*k))
        .find(|v| is_truthy(v))
        .cloned()
}

fn first_text(item: &Value, keys: &[&str]) -> Option<String> {
    first_truthy(item, keys).as_ref().and_then(scalar_text)
}

fn is_truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/hakush_tests.rs"]
mod tests;
