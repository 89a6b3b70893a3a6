//! Shared HTTP client construction for DuckDuckGo requests.
//!
//! Provides a configured [`reqwest::Client`] with a browser-like User-Agent,
//! cookie support, caller-supplied default headers, and optional proxying.

use std::time::Duration;

use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::{ClientConfig, ProxySettings};
use crate::error::SearchError;

/// Realistic browser User-Agent strings, one picked per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Build a [`reqwest::Client`] configured for DuckDuckGo.
///
/// The client has:
/// - Cookie store enabled (the `vqd` token exchange sets cookies)
/// - Timeout from config
/// - Random User-Agent from the built-in list (or custom if configured)
/// - `Referer` pointing at the main site, plus configured extra headers
/// - Proxy settings from config
///
/// # Errors
///
/// Returns [`SearchError::Config`] for invalid headers or proxies, and
/// [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &ClientConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    let mut builder = reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .default_headers(default_headers(config)?)
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(ref proxy) = config.proxy {
        builder = apply_proxy(builder, proxy)?;
    }

    builder
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

fn default_headers(config: &ClientConfig) -> Result<HeaderMap, SearchError> {
    let mut headers = HeaderMap::new();
    let referer = format!("{}/", config.endpoints.site.trim_end_matches('/'));
    let referer = HeaderValue::from_str(&referer)
        .map_err(|e| SearchError::Config(format!("invalid site endpoint: {e}")))?;
    headers.insert(reqwest::header::REFERER, referer);

    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SearchError::Config(format!("invalid header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| SearchError::Config(format!("invalid value for header {name}: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

fn apply_proxy(
    builder: reqwest::ClientBuilder,
    proxy: &ProxySettings,
) -> Result<reqwest::ClientBuilder, SearchError> {
    let invalid = |e: reqwest::Error| SearchError::Config(format!("invalid proxy: {e}"));
    match proxy {
        ProxySettings::All(url) => Ok(builder.proxy(reqwest::Proxy::all(url).map_err(invalid)?)),
        ProxySettings::PerScheme { http, https } => {
            let mut builder = builder;
            if let Some(url) = http {
                builder = builder.proxy(reqwest::Proxy::http(url).map_err(invalid)?);
            }
            if let Some(url) = https {
                builder = builder.proxy(reqwest::Proxy::https(url).map_err(invalid)?);
            }
            Ok(builder)
        }
    }
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is a non-empty const array, choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_user_agent_returns_valid_ua() {
        let ua = random_user_agent();
        assert!(USER_AGENTS.contains(&ua));
        assert!(ua.contains("Mozilla/5.0"));
    }

    #[test]
    fn build_client_with_default_config() {
        assert!(build_client(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn build_client_with_custom_ua_and_headers() {
        let mut config = ClientConfig {
            user_agent: Some("CustomBot/1.0".into()),
            ..Default::default()
        };
        config
            .headers
            .insert("Accept-Language".into(), "en-US,en;q=0.9".into());
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn build_client_with_proxies() {
        let config = ClientConfig {
            proxy: Some(ProxySettings::PerScheme {
                http: Some("http://127.0.0.1:3128".into()),
                https: Some("http://127.0.0.1:3129".into()),
            }),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn default_headers_include_referer_and_extras() {
        let mut config = ClientConfig::default();
        config.headers.insert("X-Trace".into(), "1".into());
        let headers = default_headers(&config).expect("headers");
        assert_eq!(
            headers.get(reqwest::header::REFERER).and_then(|v| v.to_str().ok()),
            Some("https://duckduckgo.com/")
        );
        assert_eq!(
            headers.get("x-trace").and_then(|v| v.to_str().ok()),
            Some("1")
        );
    }

    #[test]
    fn invalid_header_fails_build() {
        let mut config = ClientConfig::default();
        config.headers.insert("bad header".into(), "x".into());
        let err = build_client(&config).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }
}
