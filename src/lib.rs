//! # websearch
//!
//! Web search as a pipeline component.
//!
//! [`DuckDuckGoWebSearch`] takes a query, asks DuckDuckGo for the top-k hits
//! through the [`ddg_search`] client, and returns them as normalized
//! [`Document`]s together with their links.
//!
//! ## Design
//!
//! - Configuration is an immutable [`WebSearchConfig`] value; per-call
//!   backend options are copied out of it, never drained from it
//! - Components serialize to `{"type", "init_parameters"}` envelopes
//!   ([`Component`]) and rebuild from them
//! - The backend sits behind the [`SearchBackend`] trait so hosts and tests
//!   can substitute their own
//! - Ranking, paging, caching and retries are left to the backend or the host
//!
//! ## Security
//!
//! - No network listeners — this is a library, not a server
//! - Search queries are logged only at trace level

pub mod backend;
pub mod component;
pub mod config;
pub mod document;
pub mod duckduckgo;
pub mod error;

pub use backend::SearchBackend;
pub use component::Component;
pub use config::{SearchParams, WebSearchConfig};
pub use document::{Document, WebSearchOutput};
pub use duckduckgo::DuckDuckGoWebSearch;
pub use error::{Result, WebSearchError};

pub use ddg_search::{ProxySettings, SafeSearch};
