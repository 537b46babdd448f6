//! Static configuration for the supported games.
//!
//! Upstream path segments, banner-type ids and field names are vendor API
//! details, so they live here as data rather than being scattered through the
//! fetch code. The built-in table can be replaced by a TOML file of the same
//! shape.

use std::collections::HashSet;
use std::path::Path;

use gacha_ledger_catalog::Category;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base URL of the vendor's gacha info CDN.
pub const GACHA_BASE_URL: &str = "https://operation-webstatic.mihoyo.com/gacha_info";

/// Base URL of the community catalog API.
pub const CATALOG_BASE_URL: &str = "https://api.hakush.in";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parse error in registry: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid registry: {0}")]
    Invalid(String),
}

/// Names of the detail-document fields holding rate-up items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpFields {
    pub five_star: String,
    pub four_star: String,
}

/// Which banner types feed one category's history, and where it is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerTypeConfig {
    pub banner_types: Vec<i64>,
    /// File name of the history under the `manual/` data directory.
    pub manual_file: String,
}

/// One catalog document to mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMenu {
    pub menu_id: String,
    pub category: Category,
}

/// Everything the pipeline needs to know about one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEntry {
    /// Canonical CLI alias, e.g. `gi`.
    pub key: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub name: String,
    /// Path segment under [`GACHA_BASE_URL`], e.g. `hk4e/cn_gf01`.
    pub gacha_path: String,
    /// Path segment under [`CATALOG_BASE_URL`], e.g. `gi`.
    pub catalog_key: String,
    pub up_fields: UpFields,
    pub character: BannerTypeConfig,
    pub weapon: BannerTypeConfig,
    #[serde(default)]
    pub catalog_menus: Vec<CatalogMenu>,
}

impl GameEntry {
    pub fn banner_config(&self, category: Category) -> &BannerTypeConfig {
        match category {
            Category::Character => &self.character,
            Category::Weapon => &self.weapon,
        }
    }

    /// Case-insensitive match against the key and aliases.
    pub fn matches(&self, alias: &str) -> bool {
        let lower = alias.trim().to_lowercase();
        self.key.to_lowercase() == lower || self.aliases.iter().any(|a| a.to_lowercase() == lower)
    }

    pub fn gacha_list_url(&self) -> String {
        format!("{}/{}/gacha/list.json", GACHA_BASE_URL, self.gacha_path)
    }

    pub fn gacha_detail_url(&self, gacha_id: &str) -> String {
        format!("{}/{}/{}/zh-cn.json", GACHA_BASE_URL, self.gacha_path, gacha_id)
    }

    pub fn catalog_url(&self, menu_id: &str) -> String {
        format!("{}/{}/data/{}.json", CATALOG_BASE_URL, self.catalog_key, menu_id)
    }
}

/// The set of configured games, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    pub games: Vec<GameEntry>,
}

impl Registry {
    /// The three games the tool ships with.
    pub fn builtin() -> Self {
        Self {
            games: vec![
                GameEntry {
                    key: "gi".into(),
                    aliases: strings(&["genshin", "hk4e"]),
                    name: "原神".into(),
                    gacha_path: "hk4e/cn_gf01".into(),
                    catalog_key: "gi".into(),
                    up_fields: UpFields {
                        five_star: "r5_up_items".into(),
                        four_star: "r4_up_items".into(),
                    },
                    character: banner_types(&[301, 400], "301.yaml"),
                    weapon: banner_types(&[302], "302.yaml"),
                    catalog_menus: vec![
                        menu("character", Category::Character),
                        menu("weapon", Category::Weapon),
                    ],
                },
                GameEntry {
                    key: "hsr".into(),
                    aliases: strings(&["hkrpg", "starrail"]),
                    name: "崩坏：星穹铁道".into(),
                    gacha_path: "hkrpg/prod_gf_cn".into(),
                    catalog_key: "hsr".into(),
                    up_fields: star_fields(),
                    character: banner_types(&[11], "11.yaml"),
                    weapon: banner_types(&[12], "12.yaml"),
                    catalog_menus: vec![
                        menu("character", Category::Character),
                        menu("lightcone", Category::Weapon),
                    ],
                },
                GameEntry {
                    key: "zzz".into(),
                    aliases: strings(&["nap"]),
                    name: "绝区零".into(),
                    gacha_path: "nap/prod_gf_cn".into(),
                    catalog_key: "zzz".into(),
                    up_fields: star_fields(),
                    character: banner_types(&[2001, 2002, 2011, 2012], "2001.yaml"),
                    weapon: banner_types(&[3001, 3002, 3011, 3012], "3001.yaml"),
                    catalog_menus: vec![
                        menu("character", Category::Character),
                        menu("weapon", Category::Weapon),
                    ],
                },
            ],
        }
    }

    /// Parse and validate a registry from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, RegistryError> {
        let registry: Registry = toml::from_str(s)?;
        registry.validate()?;
        Ok(registry)
    }

    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let contents = std::fs::read_to_string(path).map_err(|e| RegistryError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Look up a game by key or alias (case-insensitive).
    pub fn find(&self, alias: &str) -> Option<&GameEntry> {
        self.games.iter().find(|g| g.matches(alias))
    }

    /// Canonical keys, in processing order.
    pub fn keys(&self) -> Vec<&str> {
        self.games.iter().map(|g| g.key.as_str()).collect()
    }

    fn validate(&self) -> Result<(), RegistryError> {
        if self.games.is_empty() {
            return Err(RegistryError::Invalid("no games configured".into()));
        }

        let mut seen = HashSet::new();
        for game in &self.games {
            for name in std::iter::once(&game.key).chain(game.aliases.iter()) {
                if !seen.insert(name.to_lowercase()) {
                    return Err(RegistryError::Invalid(format!(
                        "alias '{}' is used more than once",
                        name
                    )));
                }
            }
            for category in Category::ALL {
                if game.banner_config(category).manual_file.trim().is_empty() {
                    return Err(RegistryError::Invalid(format!(
                        "{} has no {} history file",
                        game.key, category
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn banner_types(ids: &[i64], manual_file: &str) -> BannerTypeConfig {
    BannerTypeConfig {
        banner_types: ids.to_vec(),
        manual_file: manual_file.to_string(),
    }
}

fn menu(menu_id: &str, category: Category) -> CatalogMenu {
    CatalogMenu {
        menu_id: menu_id.to_string(),
        category,
    }
}

fn star_fields() -> UpFields {
    UpFields {
        five_star: "items_up_star_5".into(),
        four_star: "items_up_star_4".into(),
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
