//! DuckDuckGo web search component.

use ddg_search::Ddgs;

use crate::backend::SearchBackend;
use crate::component::{default_from_config, default_to_config, Component};
use crate::config::WebSearchConfig;
use crate::document::WebSearchOutput;
use crate::error::{Result, WebSearchError};

/// Pipeline component that searches the web with DuckDuckGo.
///
/// Given a query it returns the most relevant hits as [`crate::Document`]s
/// plus the list of their URLs, in DuckDuckGo's ranking order. Every run
/// queries the backend once through the `d.js` API transport; nothing is
/// cached and failures are not retried.
///
/// The configuration is never mutated after construction, so one instance
/// can serve concurrent runs.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> websearch::Result<()> {
/// use websearch::{DuckDuckGoWebSearch, SearchParams, WebSearchConfig};
///
/// let config = WebSearchConfig::new()
///     .with_top_k(Some(5))
///     .with_search_params(SearchParams::new().with_region("us-en"));
/// let search = DuckDuckGoWebSearch::new(config)?;
/// let output = search.run("rust programming").await?;
/// for doc in &output.documents {
///     println!("{}: {}", doc.title, doc.link);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DuckDuckGoWebSearch<B = Ddgs> {
    config: WebSearchConfig,
    backend: B,
}

impl DuckDuckGoWebSearch<Ddgs> {
    /// Build the component with the default DuckDuckGo client.
    ///
    /// The client is constructed eagerly so a broken environment (TLS,
    /// proxy, headers) is reported here rather than on the first run.
    ///
    /// # Errors
    ///
    /// Returns [`WebSearchError::Config`] for an invalid configuration and
    /// [`WebSearchError::BackendUnavailable`] if the client cannot be built.
    pub fn new(config: WebSearchConfig) -> Result<Self> {
        config.validate()?;
        let backend = Ddgs::new(config.client_config())
            .map_err(|e| WebSearchError::BackendUnavailable(e.to_string()))?;
        Ok(Self { config, backend })
    }
}

impl<B: SearchBackend> DuckDuckGoWebSearch<B> {
    /// Build the component around an existing backend.
    ///
    /// # Errors
    ///
    /// Returns [`WebSearchError::Config`] for an invalid configuration.
    pub fn with_backend(config: WebSearchConfig, backend: B) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, backend })
    }

    /// Rebuild the component from a config envelope around an existing backend.
    ///
    /// # Errors
    ///
    /// Same as [`Component::from_config`].
    pub fn from_config_with_backend(config: &serde_json::Value, backend: B) -> Result<Self> {
        let params: WebSearchConfig = default_from_config::<DuckDuckGoWebSearch, _>(config)?;
        Self::with_backend(params, backend)
    }

    /// Serialize the component to a config envelope.
    ///
    /// # Errors
    ///
    /// Returns [`WebSearchError::Serialization`] if the parameters cannot be
    /// represented as JSON.
    pub fn to_config(&self) -> Result<serde_json::Value> {
        default_to_config::<DuckDuckGoWebSearch, _>(&self.config)
    }

    /// The component's configuration.
    pub fn config(&self) -> &WebSearchConfig {
        &self.config
    }

    /// The search backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Search for `query` and return documents plus links.
    ///
    /// Safe-search level and region are read from the configured search
    /// params (defaults `moderate` and `wt-wt`); all other params are passed
    /// through. Up to `top_k` results are requested. Records missing a title,
    /// snippet or URL yield empty strings in those fields.
    ///
    /// # Errors
    ///
    /// Returns [`WebSearchError::Backend`] if the search fails. No partial
    /// output is produced.
    pub async fn run(&self, query: &str) -> Result<WebSearchOutput> {
        let options = self.config.search_params.text_options(self.config.top_k)?;

        tracing::trace!(query, "DuckDuckGoWebSearch run");
        let records = self.backend.text(query, &options).await?;

        let output = WebSearchOutput::from_records(&records);
        tracing::debug!(
            documents = output.len(),
            "DuckDuckGoWebSearch returned documents"
        );
        Ok(output)
    }

    /// Blocking variant of [`Self::run`] for synchronous hosts.
    ///
    /// Drives the search on a private current-thread runtime. Async callers
    /// should await [`Self::run`] instead.
    ///
    /// # Errors
    ///
    /// Same as [`Self::run`], plus [`WebSearchError::Runtime`] when called
    /// from inside a tokio runtime and [`WebSearchError::Io`] if the private
    /// runtime cannot be started.
    pub fn run_blocking(&self, query: &str) -> Result<WebSearchOutput> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(WebSearchError::Runtime(
                "run_blocking called from inside an async runtime; await run() instead".into(),
            ));
        }
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run(query))
    }
}

impl Component for DuckDuckGoWebSearch<Ddgs> {
    const TYPE_NAME: &'static str = "websearch::duckduckgo::DuckDuckGoWebSearch";
    const OUTPUT_NAMES: &'static [&'static str] = &["documents", "links"];

    fn to_config(&self) -> Result<serde_json::Value> {
        default_to_config::<Self, _>(&self.config)
    }

    fn from_config(config: &serde_json::Value) -> Result<Self> {
        let params: WebSearchConfig = default_from_config::<Self, _>(config)?;
        Self::new(params)
    }
}
