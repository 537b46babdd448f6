use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be read or parsed
    #[error("Settings error: {0}")]
    Settings(String),

    /// Registry file could not be loaded
    #[error("Registry error: {0}")]
    Registry(#[from] gacha_ledger_scraper::RegistryError),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[from] gacha_ledger_scraper::FetchError),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
