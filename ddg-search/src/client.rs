//! The [`Ddgs`] client.

use crate::config::ClientConfig;
use crate::error::SearchError;
use crate::http;
use crate::transports;
use crate::types::{TextOptions, TextResult, Transport};

/// A DuckDuckGo text search client.
///
/// Holds one pooled [`reqwest::Client`]; cloning a `Ddgs` is cheap and the
/// clones share connections. The client keeps no per-query state, so a
/// single instance can serve concurrent searches.
#[derive(Debug, Clone)]
pub struct Ddgs {
    client: reqwest::Client,
    config: ClientConfig,
}

impl Ddgs {
    /// Build a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid, or
    /// [`SearchError::Http`] if the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self, SearchError> {
        config.validate()?;
        let client = http::build_client(&config)?;
        Ok(Self { client, config })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run a text search and return one page of raw records.
    ///
    /// Records come back in DuckDuckGo's ranking order, truncated to
    /// `options.max_results` when set. Only the first result page is read.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Timeout`] or [`SearchError::Http`] for transport
    /// failures, [`SearchError::RateLimited`] when DuckDuckGo throttles the
    /// client, and [`SearchError::Parse`] for responses that cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> ddg_search::Result<()> {
    /// use ddg_search::{ClientConfig, Ddgs, SafeSearch, TextOptions};
    ///
    /// let ddgs = Ddgs::new(ClientConfig::default())?;
    /// let options = TextOptions::new()
    ///     .with_max_results(Some(5))
    ///     .with_safesearch(SafeSearch::Off);
    /// for hit in ddgs.text("rust programming", &options).await? {
    ///     println!("{:?}: {:?}", hit.title, hit.href);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn text(
        &self,
        query: &str,
        options: &TextOptions,
    ) -> Result<Vec<TextResult>, SearchError> {
        if options.max_results == Some(0) {
            return Ok(Vec::new());
        }
        tracing::trace!(query, transport = %options.transport, "DuckDuckGo text search");

        let endpoints = &self.config.endpoints;
        match options.transport {
            Transport::Api => transports::api::search(&self.client, endpoints, query, options).await,
        }
    }
}
