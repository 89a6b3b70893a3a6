//! Trait seam between the component and its search backend.

use ddg_search::{Ddgs, SearchError, TextOptions, TextResult};

/// A text search backend.
///
/// Implementors run one search and return raw records in ranking order.
/// All implementations must be `Send + Sync` so one component instance can
/// serve concurrent pipeline runs.
pub trait SearchBackend: Send + Sync {
    /// Run a text search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] for any failure; the component reports it as
    /// a backend failure without retrying.
    fn text(
        &self,
        query: &str,
        options: &TextOptions,
    ) -> impl std::future::Future<Output = Result<Vec<TextResult>, SearchError>> + Send;
}

impl SearchBackend for Ddgs {
    async fn text(
        &self,
        query: &str,
        options: &TextOptions,
    ) -> Result<Vec<TextResult>, SearchError> {
        Ddgs::text(self, query, options).await
    }
}
