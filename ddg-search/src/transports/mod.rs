//! DuckDuckGo transports.
//!
//! A transport turns a query plus [`crate::TextOptions`] into HTTP requests
//! against a DuckDuckGo frontend and parses the response into
//! [`crate::TextResult`] records.

pub mod api;

use reqwest::StatusCode;

use crate::error::SearchError;

/// Map a response status to an error, passing successful responses through.
///
/// DuckDuckGo answers throttled clients with 202, 403 or 429.
pub(crate) fn check_status(
    what: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, SearchError> {
    let status = response.status();
    if matches!(
        status,
        StatusCode::ACCEPTED | StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    ) {
        return Err(SearchError::RateLimited(format!("{what} returned {status}")));
    }
    if !status.is_success() {
        return Err(SearchError::Http(format!("{what} returned {status}")));
    }
    Ok(response)
}

/// Fetch a response body as text.
pub(crate) async fn read_body(what: &str, response: reqwest::Response) -> Result<String, SearchError> {
    response
        .text()
        .await
        .map_err(|e| SearchError::from_reqwest(&format!("{what} response read failed"), &e))
}

/// Join a base URL and a path without doubling slashes.
pub(crate) fn join(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
