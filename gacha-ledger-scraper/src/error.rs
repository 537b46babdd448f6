/// Errors that can occur while talking to an upstream API.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse response from {url}: {source}. Response: {snippet}")]
    Parse {
        url: String,
        source: serde_json::Error,
        snippet: String,
    },

    #[error("Unexpected upstream data: {0}")]
    InvalidUpstreamShape(String),
}

impl FetchError {
    pub fn invalid_shape(msg: impl Into<String>) -> Self {
        Self::InvalidUpstreamShape(msg.into())
    }
}
