//! Error types for the web search component.

/// Errors raised by [`crate::DuckDuckGoWebSearch`].
#[derive(Debug, thiserror::Error)]
pub enum WebSearchError {
    /// The search backend failed (network, timeout, throttling, bad response).
    #[error("search backend failure: {0}")]
    Backend(String),

    /// The search backend client could not be constructed.
    #[error("search backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Invalid component configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Configuration could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A blocking call was made from inside an async runtime.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ddg_search::SearchError> for WebSearchError {
    fn from(err: ddg_search::SearchError) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, WebSearchError>;
