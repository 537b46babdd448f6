use std::time::Duration;

use serde_json::Value;

use crate::error::FetchError;

/// How much of an unparseable body to keep in the error message.
const SNIPPET_CHARS: usize = 200;

/// Browser-like client hints the catalog CDN expects.
const BROWSER_HINTS: &[(&str, &str)] = &[
    (
        "sec-ch-ua",
        "\"Chromium\";v=\"130\", \"Google Chrome\";v=\"130\", \"Not?A_Brand\";v=\"99\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
];

/// Per-request settings: extra headers and whether to defeat CDN caching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestProfile {
    pub headers: Vec<(String, String)>,
    /// Append `ts=<unix millis>` to the query string.
    pub cache_bust: bool,
}

impl RequestProfile {
    /// Profile for the gacha info endpoints, which sit behind an aggressive cache.
    pub fn gacha() -> Self {
        Self {
            headers: Vec::new(),
            cache_bust: true,
        }
    }

    /// Profile for the catalog API.
    pub fn catalog() -> Self {
        Self {
            headers: BROWSER_HINTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            cache_bust: false,
        }
    }
}

/// Anything that can turn a URL into a parsed JSON document.
///
/// The pipeline is generic over this so tests can serve canned documents.
#[allow(async_fn_in_trait)]
pub trait JsonFetch {
    async fn fetch_json(&self, url: &str, profile: &RequestProfile) -> Result<Value, FetchError>;
}

/// Options for building an [`HttpClient`].
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Whole-request timeout. `None` waits as long as the server does.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// HTTP client for the upstream JSON APIs.
pub struct HttpClient {
    http: reqwest::Client,
}

impl HttpClient {
    pub fn new(options: &ClientOptions) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(ref agent) = options.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        Ok(Self {
            http: builder.build()?,
        })
    }
}

impl JsonFetch for HttpClient {
    async fn fetch_json(&self, url: &str, profile: &RequestProfile) -> Result<Value, FetchError> {
        let url = if profile.cache_bust {
            with_cache_buster(url, chrono::Utc::now().timestamp_millis())
        } else {
            url.to_string()
        };
        log::debug!("Requesting {}", url);

        let mut request = self.http.get(&url);
        for (name, value) in &profile.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url,
                status: status.as_u16(),
            });
        }

        let text = resp.text().await?;
        parse_body(&url, &text)
    }
}

/// Add a `ts` query parameter, respecting an existing query string.
pub fn with_cache_buster(url: &str, millis: i64) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}ts={millis}")
}

/// Parse a response body. A blank body is an empty object.
pub fn parse_body(url: &str, text: &str) -> Result<Value, FetchError> {
    if text.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(text).map_err(|e| FetchError::Parse {
        url: url.to_string(),
        source: e,
        snippet: text.chars().take(SNIPPET_CHARS).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_buster_starts_query() {
        assert_eq!(
            with_cache_buster("https://x/list.json", 42),
            "https://x/list.json?ts=42"
        );
    }

    #[test]
    fn cache_buster_extends_query() {
        assert_eq!(
            with_cache_buster("https://x/list.json?lang=zh", 7),
            "https://x/list.json?lang=zh&ts=7"
        );
    }

    #[test]
    fn blank_body_is_empty_object() {
        let v = parse_body("u", "  \n").unwrap();
        assert!(v.as_object().unwrap().is_empty());
    }

    #[test]
    fn malformed_body_keeps_snippet() {
        let body = "祈".repeat(300);
        match parse_body("u", &body) {
            Err(FetchError::Parse { snippet, .. }) => assert_eq!(snippet.chars().count(), 200),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn catalog_profile_sends_client_hints() {
        let profile = RequestProfile::catalog();
        assert!(!profile.cache_bust);
        assert!(profile.headers.iter().any(|(k, _)| k == "sec-ch-ua-mobile"));
        assert!(RequestProfile::gacha().cache_bust);
    }
}
