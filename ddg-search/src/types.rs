//! Core types for text search options and result records.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Default region code: "no region".
pub const DEFAULT_REGION: &str = "wt-wt";

/// Safe-search filtering level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    /// Strict filtering.
    On,
    /// DuckDuckGo's default filtering.
    #[default]
    Moderate,
    /// No filtering.
    Off,
}

impl SafeSearch {
    /// Returns the lowercase wire name of this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Moderate => "moderate",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for SafeSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafeSearch {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "on" => Ok(Self::On),
            "moderate" => Ok(Self::Moderate),
            "off" => Ok(Self::Off),
            other => Err(SearchError::Config(format!(
                "unknown safesearch level {other:?} (expected on, moderate or off)"
            ))),
        }
    }
}

/// Which DuckDuckGo frontend a text search goes through.
///
/// Only the `d.js` JSON API is supported; HTML scraping is not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// The `d.js` JSON API behind the main site.
    #[default]
    Api,
}

impl Transport {
    /// Returns the lowercase name of this transport.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Api => "api",
        }
    }
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call options for [`crate::Ddgs::text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOptions {
    /// Maximum number of results to return. `None` returns the whole first page.
    pub max_results: Option<usize>,
    /// Safe-search level.
    pub safesearch: SafeSearch,
    /// Region code such as `us-en` or `wt-wt`.
    pub region: String,
    /// Time limit: `d`, `w`, `m` or `y`.
    pub timelimit: Option<String>,
    /// Transport to use.
    pub transport: Transport,
    /// Extra query parameters forwarded verbatim.
    pub extra: BTreeMap<String, String>,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            max_results: None,
            safesearch: SafeSearch::default(),
            region: DEFAULT_REGION.to_string(),
            timelimit: None,
            transport: Transport::default(),
            extra: BTreeMap::new(),
        }
    }
}

impl TextOptions {
    /// Creates options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of results.
    pub fn with_max_results(mut self, max_results: Option<usize>) -> Self {
        self.max_results = max_results;
        self
    }

    /// Sets the safe-search level.
    pub fn with_safesearch(mut self, safesearch: SafeSearch) -> Self {
        self.safesearch = safesearch;
        self
    }

    /// Sets the region code.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the transport.
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Adds an extra query parameter.
    ///
    /// The `timelimit` key is routed to [`TextOptions::timelimit`].
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        if key == "timelimit" {
            self.timelimit = Some(value.into());
        } else {
            self.extra.insert(key, value.into());
        }
        self
    }

    /// Market code derived from the region, e.g. `us-en` → `en-US`.
    ///
    /// `wt-wt` becomes `wt-WT`, which is what DuckDuckGo's own frontend sends.
    pub(crate) fn bing_market(&self) -> String {
        match self.region.split_once('-') {
            Some((country, lang)) => format!("{lang}-{}", country.to_ascii_uppercase()),
            None => String::new(),
        }
    }
}

/// One raw text search hit.
///
/// Every field is optional: DuckDuckGo rows are not guaranteed to carry a
/// title, link or body, and consumers decide how to fill the gaps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextResult {
    /// Result title.
    #[serde(default)]
    pub title: Option<String>,
    /// Target URL.
    #[serde(default)]
    pub href: Option<String>,
    /// Snippet text.
    #[serde(default)]
    pub body: Option<String>,
}

impl TextResult {
    /// Build a record from loosely-shaped JSON.
    ///
    /// Accepts `href`, `url` or `link` for the URL and `body`, `answer` or
    /// `snippet` for the text. Fields that are missing or not strings are
    /// left empty. Returns `None` only when `value` is not a JSON object.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let obj = value.as_object()?;
        let pick = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| obj.get(*k).and_then(serde_json::Value::as_str))
                .map(str::to_owned)
        };
        Some(Self {
            title: pick(&["title"]),
            href: pick(&["href", "url", "link"]),
            body: pick(&["body", "answer", "snippet"]),
        })
    }
}
