//! YAML storage for banner histories.
//!
//! Each history is one YAML file holding a sequence of [`BannerRecord`]s,
//! newest first. Files are read whole and rewritten whole; a missing file is
//! an empty history.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::BannerRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("YAML serialize error for {path}: {source}")]
    Serialize {
        path: String,
        source: serde_yml::Error,
    },
}

/// A banner history file on disk.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read every record. A missing, empty, or `null` document is an empty history.
    pub fn load(&self) -> Result<Vec<BannerRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Option<Vec<BannerRecord>> =
            serde_yml::from_str(&contents).map_err(|e| StoreError::Parse {
                path: self.path.display().to_string(),
                source: e,
            })?;
        Ok(records.unwrap_or_default())
    }

    /// Replace the file with `records`, creating parent directories as needed.
    ///
    /// The new contents go to a sibling temp file first and are renamed over
    /// the old file, so readers never see a half-written history.
    pub fn save(&self, records: &[BannerRecord]) -> Result<(), StoreError> {
        let serialized = serde_yml::to_string(records).map_err(|e| StoreError::Serialize {
            path: self.path.display().to_string(),
            source: e,
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let tmp = self.path.with_extension("yaml.tmp");
        std::fs::write(&tmp, serialized).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

/// Order a history newest first by the start of each window.
///
/// Records whose `from` is not a recognizable date go after every dated
/// record. The sort is stable, so equal starts keep their relative order.
pub fn sort_history(records: &mut [BannerRecord]) {
    records.sort_by(|a, b| match (a.starts_at(), b.starts_at()) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}
