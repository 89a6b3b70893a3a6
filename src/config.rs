//! Component configuration.
//!
//! [`WebSearchConfig`] holds the init parameters of the web search
//! component. It is an immutable value: per-call backend options are
//! derived from it by [`SearchParams::text_options`] without touching the
//! stored configuration.

use std::collections::BTreeMap;
use std::path::Path;

use ddg_search::{ClientConfig, ProxySettings, SafeSearch, TextOptions, Transport, DEFAULT_REGION};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, WebSearchError};

/// Default number of results requested per query.
pub const DEFAULT_TOP_K: usize = 10;

/// Default backend timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Init parameters of [`crate::DuckDuckGoWebSearch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSearchConfig {
    /// Maximum number of results requested. `None` takes whatever a single
    /// backend page returns.
    #[serde(deserialize_with = "deserialize_top_k")]
    pub top_k: Option<usize>,
    /// Backend request timeout in seconds.
    pub timeout: u64,
    /// Extra HTTP headers sent to the backend.
    pub headers: Option<BTreeMap<String, String>>,
    /// Proxy settings for backend requests.
    pub proxies: Option<ProxySettings>,
    /// Backend search options.
    pub search_params: SearchParams,
}

impl Default for WebSearchConfig {
    fn default() -> Self {
        Self {
            top_k: Some(DEFAULT_TOP_K),
            timeout: DEFAULT_TIMEOUT_SECS,
            headers: None,
            proxies: None,
            search_params: SearchParams::default(),
        }
    }
}

/// Accepts an integer, `null`, or the keyword `"all"` (TOML has no null).
fn deserialize_top_k<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Count(usize),
        Keyword(String),
    }

    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Repr::Count(n)) => Ok(Some(n)),
        Some(Repr::Keyword(k)) if k == TOP_K_ALL => Ok(None),
        Some(Repr::Keyword(k)) => Err(serde::de::Error::custom(format!(
            "invalid top_k {k:?}: expected an integer, null or \"{TOP_K_ALL}\""
        ))),
    }
}

const TOP_K_ALL: &str = "all";

impl WebSearchConfig {
    /// Creates a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of results.
    pub fn with_top_k(mut self, top_k: Option<usize>) -> Self {
        self.top_k = top_k;
        self
    }

    /// Sets the backend timeout in seconds.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Adds an HTTP header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Sets the proxy settings.
    pub fn with_proxies(mut self, proxies: ProxySettings) -> Self {
        self.proxies = Some(proxies);
        self
    }

    /// Replaces the search params.
    pub fn with_search_params(mut self, search_params: SearchParams) -> Self {
        self.search_params = search_params;
        self
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `top_k`, when set, must be greater than 0
    /// - the backend client settings (timeout, headers, proxies) must be valid
    /// - every passthrough option must be a scalar
    pub fn validate(&self) -> Result<()> {
        if self.top_k == Some(0) {
            return Err(WebSearchError::Config(
                "top_k must be greater than 0".into(),
            ));
        }
        if self.timeout == 0 {
            return Err(WebSearchError::Config(
                "timeout must be greater than 0".into(),
            ));
        }
        self.client_config()
            .validate()
            .map_err(|e| WebSearchError::Config(e.to_string()))?;
        self.search_params.validate()
    }

    /// Backend client settings derived from this configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout_seconds: self.timeout,
            headers: self.headers.clone().unwrap_or_default(),
            proxy: self.proxies.clone(),
            ..Default::default()
        }
    }

    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| WebSearchError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // TOML has no null; a null passthrough option means "not set" anyway.
        let mut persisted = self.clone();
        persisted.search_params.extra.retain(|_, value| !value.is_null());
        let mut table = toml::Table::try_from(&persisted)
            .map_err(|e| WebSearchError::Serialization(e.to_string()))?;
        if self.top_k.is_none() {
            table.insert("top_k".into(), toml::Value::String(TOP_K_ALL.into()));
        }
        let content = toml::to_string_pretty(&table)
            .map_err(|e| WebSearchError::Serialization(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Backend-specific search options.
///
/// `safesearch` and `region` are known options with per-call defaults
/// (`moderate` and `wt-wt`). Every other key lands in `extra` and is
/// forwarded to the backend unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Safe-search level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safesearch: Option<SafeSearch>,
    /// Region code such as `us-en`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Passthrough options.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl SearchParams {
    /// Creates empty search params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the safe-search level.
    pub fn with_safesearch(mut self, safesearch: SafeSearch) -> Self {
        self.safesearch = Some(safesearch);
        self
    }

    /// Sets the region code.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Adds a passthrough option.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Safe-search level for a call: the configured one, or `moderate`.
    pub fn resolved_safesearch(&self) -> SafeSearch {
        self.safesearch.unwrap_or_default()
    }

    /// Region for a call: the configured one, or `wt-wt`.
    pub fn resolved_region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    fn validate(&self) -> Result<()> {
        for (key, value) in &self.extra {
            passthrough_value(key, value)?;
        }
        Ok(())
    }

    /// Build the backend options for one call.
    ///
    /// Reads the stored params and copies them into a fresh [`TextOptions`];
    /// `self` is left untouched so repeated and concurrent calls agree.
    pub fn text_options(&self, max_results: Option<usize>) -> Result<TextOptions> {
        let mut options = TextOptions::new()
            .with_max_results(max_results)
            .with_safesearch(self.resolved_safesearch())
            .with_region(self.resolved_region())
            .with_transport(Transport::Api);
        for (key, value) in &self.extra {
            if let Some(value) = passthrough_value(key, value)? {
                options = options.with_extra(key.as_str(), value);
            }
        }
        Ok(options)
    }
}

/// String form of a passthrough value; `null` means "not set".
fn passthrough_value(key: &str, value: &serde_json::Value) -> Result<Option<String>> {
    use serde_json::Value;
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Array(_) | Value::Object(_) => Err(WebSearchError::Config(format!(
            "search_params.{key} must be a string, number or boolean"
        ))),
    }
}
