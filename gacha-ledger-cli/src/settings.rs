//! Application settings: `~/.config/gacha-ledger/settings.toml`.
//!
//! ```toml
//! [output]
//! data_dir = "/srv/gacha/data"
//!
//! [http]
//! timeout_secs = 30
//! user_agent = "gacha-ledger"
//! ```
//!
//! Every field is optional. A missing file is the same as an empty one.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gacha_ledger_scraper::ClientOptions;
use serde::Deserialize;

use crate::error::CliError;

/// Environment variable that overrides the data directory from settings.
pub(crate) const DATA_DIR_ENV: &str = "GACHA_LEDGER_DATA_DIR";

/// Data directory used when nothing else names one.
pub(crate) const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Settings {
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub http: HttpSettings,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OutputSettings {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HttpSettings {
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

/// Where the effective data directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DataDirSource {
    Flag,
    EnvVar,
    SettingsFile,
    Default,
}

impl fmt::Display for DataDirSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataDirSource::Flag => write!(f, "--data-dir"),
            DataDirSource::EnvVar => write!(f, "{}", DATA_DIR_ENV),
            DataDirSource::SettingsFile => write!(f, "settings file"),
            DataDirSource::Default => write!(f, "default"),
        }
    }
}

/// Canonical path to the settings file: `~/.config/gacha-ledger/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("gacha-ledger").join("settings.toml")
}

impl Settings {
    /// Load the settings file, or defaults when it does not exist.
    pub(crate) fn load() -> Result<Self, CliError> {
        Self::load_from(&settings_path())
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self, CliError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents)
                .map_err(|e| CliError::settings(format!("{}: {}", path.display(), e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(CliError::settings(format!("{}: {}", path.display(), e))),
        }
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Resolve the data directory using a priority chain:
    ///
    /// 1. CLI override (if `Some`)
    /// 2. `GACHA_LEDGER_DATA_DIR`
    /// 3. `output.data_dir` in `settings.toml`
    /// 4. `./data`
    pub(crate) fn resolve_data_dir(
        &self,
        cli_override: Option<PathBuf>,
    ) -> (PathBuf, DataDirSource) {
        let env = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        self.resolve_data_dir_with(cli_override, env)
    }

    fn resolve_data_dir_with(
        &self,
        cli_override: Option<PathBuf>,
        env: Option<PathBuf>,
    ) -> (PathBuf, DataDirSource) {
        if let Some(p) = cli_override {
            return (p, DataDirSource::Flag);
        }
        if let Some(p) = env.filter(|p| !p.as_os_str().is_empty()) {
            return (p, DataDirSource::EnvVar);
        }
        if let Some(p) = self.output.data_dir.clone() {
            return (p, DataDirSource::SettingsFile);
        }
        (PathBuf::from(DEFAULT_DATA_DIR), DataDirSource::Default)
    }

    pub(crate) fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: self.http.timeout_secs.map(Duration::from_secs),
            user_agent: self.http.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_settings_use_defaults() {
        let settings = Settings::parse("").unwrap();
        let (dir, source) = settings.resolve_data_dir_with(None, None);
        assert_eq!(dir, PathBuf::from("data"));
        assert_eq!(source, DataDirSource::Default);
        assert!(settings.client_options().timeout.is_none());
    }

    #[test]
    fn data_dir_priority_chain() {
        let settings = Settings::parse("[output]\ndata_dir = \"/from/settings\"\n").unwrap();

        let (dir, source) = settings.resolve_data_dir_with(None, None);
        assert_eq!(dir, PathBuf::from("/from/settings"));
        assert_eq!(source, DataDirSource::SettingsFile);

        let (dir, source) = settings.resolve_data_dir_with(None, Some("/from/env".into()));
        assert_eq!(dir, PathBuf::from("/from/env"));
        assert_eq!(source, DataDirSource::EnvVar);

        let (dir, source) =
            settings.resolve_data_dir_with(Some("/from/flag".into()), Some("/from/env".into()));
        assert_eq!(dir, PathBuf::from("/from/flag"));
        assert_eq!(source, DataDirSource::Flag);
    }

    #[test]
    fn empty_env_var_is_ignored() {
        let settings = Settings::default();
        let (_, source) = settings.resolve_data_dir_with(None, Some(PathBuf::new()));
        assert_eq!(source, DataDirSource::Default);
    }

    #[test]
    fn http_settings_become_client_options() {
        let settings =
            Settings::parse("[http]\ntimeout_secs = 30\nuser_agent = \"ledger/1\"\n").unwrap();
        let options = settings.client_options();
        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
        assert_eq!(options.user_agent.as_deref(), Some("ledger/1"));
    }

    #[test]
    fn missing_file_is_default_and_bad_file_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        assert!(Settings::load_from(&path).unwrap().output.data_dir.is_none());

        std::fs::write(&path, "[output\n").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(CliError::Settings(_))
        ));
    }
}
