//! Client configuration with sensible defaults.
//!
//! [`ClientConfig`] controls timeouts, extra headers, proxying, and the
//! DuckDuckGo endpoints the client talks to. Endpoints are overridable so
//! the transports can be exercised against a local mock server.

use std::collections::BTreeMap;

use reqwest::header::{HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SearchError;

/// Proxy settings for outgoing requests.
///
/// Accepts either a single proxy URL used for every scheme, or separate
/// proxies for `http` and `https` traffic. Supported proxy schemes are
/// `http`, `https`, `socks5` and `socks5h`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProxySettings {
    /// One proxy for all traffic, e.g. `socks5://127.0.0.1:9150`.
    All(String),
    /// Per-scheme proxies.
    PerScheme {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        http: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        https: Option<String>,
    },
}

impl ProxySettings {
    /// Iterate over every proxy URL in these settings.
    pub fn urls(&self) -> Vec<&str> {
        match self {
            Self::All(url) => vec![url.as_str()],
            Self::PerScheme { http, https } => http
                .iter()
                .chain(https.iter())
                .map(String::as_str)
                .collect(),
        }
    }

    fn validate(&self) -> Result<(), SearchError> {
        for raw in self.urls() {
            let parsed = Url::parse(raw)
                .map_err(|e| SearchError::Config(format!("invalid proxy URL {raw:?}: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https" | "socks5" | "socks5h") {
                return Err(SearchError::Config(format!(
                    "unsupported proxy scheme {:?}",
                    parsed.scheme()
                )));
            }
        }
        Ok(())
    }
}

/// Base URLs of the DuckDuckGo services used by the transports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Main site, used to obtain the `vqd` token.
    pub site: String,
    /// Links service serving `d.js` result pages.
    pub links: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            site: "https://duckduckgo.com".into(),
            links: "https://links.duckduckgo.com".into(),
        }
    }
}

impl Endpoints {
    /// Point every service at the same base URL (handy for mock servers).
    pub fn all(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            site: base.clone(),
            links: base,
        }
    }

    fn validate(&self) -> Result<(), SearchError> {
        for (name, raw) in [("site", &self.site), ("links", &self.links)] {
            Url::parse(raw)
                .map_err(|e| SearchError::Config(format!("invalid {name} endpoint: {e}")))?;
        }
        Ok(())
    }
}

/// Configuration for a [`crate::Ddgs`] client.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Extra headers sent with every request.
    pub headers: BTreeMap<String, String>,
    /// Optional proxy.
    pub proxy: Option<ProxySettings>,
    /// Custom User-Agent string. If `None`, picks one from a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Service base URLs.
    pub endpoints: Endpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            headers: BTreeMap::new(),
            proxy: None,
            user_agent: None,
            endpoints: Endpoints::default(),
        }
    }
}

impl ClientConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `timeout_seconds` must be greater than 0
    /// - every header name and value must be valid HTTP
    /// - proxy URLs must parse and use a supported scheme
    /// - endpoints must be absolute URLs
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        for (name, value) in &self.headers {
            HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| SearchError::Config(format!("invalid header name {name:?}: {e}")))?;
            HeaderValue::from_str(value)
                .map_err(|e| SearchError::Config(format!("invalid value for header {name:?}: {e}")))?;
        }
        if let Some(ref proxy) = self.proxy {
            proxy.validate()?;
        }
        self.endpoints.validate()
    }
}
