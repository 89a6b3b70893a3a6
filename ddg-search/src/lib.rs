//! # ddg-search
//!
//! DuckDuckGo text search client. No API keys, no external services.
//!
//! ## Design
//!
//! - [`Ddgs`] wraps one pooled `reqwest` client built from [`ClientConfig`]
//!   (timeout, extra headers, proxies, User-Agent)
//! - Results come from the `d.js` JSON API behind the main site
//!   ([`Transport::Api`]); the vqd token is fetched first on every call
//! - One result page per call; ranking is DuckDuckGo's own
//! - Records are returned raw ([`TextResult`]) with every field optional
//!
//! ## Security
//!
//! - No network listeners — this is a library, not a server
//! - Search queries are logged only at trace level and never appear in errors

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod transports;
pub mod types;

pub use client::Ddgs;
pub use config::{ClientConfig, Endpoints, ProxySettings};
pub use error::{Result, SearchError};
pub use types::{SafeSearch, TextOptions, TextResult, Transport, DEFAULT_REGION};
