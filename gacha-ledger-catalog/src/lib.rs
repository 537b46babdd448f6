//! Banner history data model, YAML history store, and banner-name resolution.
//!
//! This crate defines the persistent shape of the hand-maintained banner
//! histories without any network dependencies. The scraper produces
//! [`BannerObservation`]s, the import crate folds them into [`BannerRecord`]s,
//! and [`HistoryStore`] reads and writes them.

pub mod name_parser;
pub mod types;
pub mod yaml;

pub use name_parser::{UNKNOWN_BANNER_NAME, resolve_banner_name, strip_markup};
pub use types::*;
pub use yaml::{HistoryStore, StoreError, sort_history};
