//! Upstream access: the HTTP client, the game registry, banner fetching and
//! up-item extraction, and the catalog mirror projector.

pub mod banners;
pub mod client;
pub mod error;
pub mod extract;
pub mod hakush;
pub mod progress;
pub mod registry;
pub mod types;

pub use banners::{BannerFailure, CategoryFetch, fetch_banner_list, fetch_category};
pub use client::{ClientOptions, HttpClient, JsonFetch, RequestProfile};
pub use error::FetchError;
pub use extract::extract_up_items;
pub use hakush::{CatalogError, CatalogMirror, MirrorSummary, project_catalog, refresh_mirror};
pub use progress::{HarvestProgress, SilentProgress};
pub use registry::{GameEntry, Registry, RegistryError};
pub use types::GachaListEntry;
