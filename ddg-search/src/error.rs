//! Error types for the ddg-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Search queries never appear in error messages.

/// Errors that can occur while querying DuckDuckGo.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A request did not complete within the configured timeout.
    #[error("search timed out: {0}")]
    Timeout(String),

    /// DuckDuckGo refused the request (HTTP 202, 403 or 429).
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Failed to parse the response body.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid client configuration or search options.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Classify a [`reqwest::Error`] raised while talking to `what`.
    pub(crate) fn from_reqwest(what: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{what}: {err}"))
        } else {
            Self::Http(format!("{what}: {err}"))
        }
    }
}

/// Convenience type alias for ddg-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
