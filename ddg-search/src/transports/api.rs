//! `d.js` API transport.
//!
//! A text search takes two requests: the main site hands out a per-query
//! `vqd` token, then the links service returns a JavaScript payload whose
//! `DDG.pageLayout.load('d', [...])` call carries the result rows as JSON.

use crate::config::Endpoints;
use crate::error::SearchError;
use crate::normalize::plain_text;
use crate::transports::{check_status, join, read_body};
use crate::types::{SafeSearch, TextOptions, TextResult};

const PAGE_LAYOUT_MARKER: &str = "DDG.pageLayout.load('d',";
const DUCKBAR_MARKER: &str = ");DDG.duckbar.load(";

/// Run a text search through the `d.js` API.
pub(crate) async fn search(
    client: &reqwest::Client,
    endpoints: &Endpoints,
    query: &str,
    options: &TextOptions,
) -> Result<Vec<TextResult>, SearchError> {
    let vqd = fetch_vqd(client, endpoints, query).await?;

    let params = build_params(query, &vqd, options);
    let response = client
        .get(join(&endpoints.links, "d.js"))
        .query(&params)
        .send()
        .await
        .map_err(|e| SearchError::from_reqwest("d.js request failed", &e))?;
    let body = read_body("d.js", check_status("d.js", response)?).await?;

    tracing::trace!(bytes = body.len(), "d.js response received");

    let mut results = parse_results(&body)?;
    if let Some(max) = options.max_results {
        results.truncate(max);
    }
    Ok(results)
}

async fn fetch_vqd(
    client: &reqwest::Client,
    endpoints: &Endpoints,
    query: &str,
) -> Result<String, SearchError> {
    let response = client
        .post(join(&endpoints.site, ""))
        .form(&[("q", query)])
        .send()
        .await
        .map_err(|e| SearchError::from_reqwest("vqd request failed", &e))?;
    let body = read_body("vqd", check_status("vqd", response)?).await?;
    extract_vqd(&body).ok_or_else(|| SearchError::Parse("vqd token not found".into()))
}

/// Pull the `vqd` token out of the main site's HTML.
///
/// The token appears as `vqd="…"`, `vqd=…&` or `vqd='…'` depending on page
/// version; the forms are tried in that order.
pub(crate) fn extract_vqd(html: &str) -> Option<String> {
    for (open, close) in [("vqd=\"", "\""), ("vqd=", "&"), ("vqd='", "'")] {
        let Some(start) = html.find(open).map(|i| i + open.len()) else {
            continue;
        };
        if let Some(len) = html[start..].find(close) {
            let token = &html[start..start + len];
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    None
}

/// Build the `d.js` query string.
pub(crate) fn build_params(
    query: &str,
    vqd: &str,
    options: &TextOptions,
) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = vec![
        ("q".into(), query.into()),
        ("kl".into(), options.region.clone()),
        ("l".into(), options.region.clone()),
        ("p".into(), String::new()),
        ("s".into(), "0".into()),
        ("df".into(), options.timelimit.clone().unwrap_or_default()),
        ("vqd".into(), vqd.into()),
        ("bing_market".into(), options.bing_market()),
        ("ex".into(), String::new()),
    ];

    let set = |params: &mut Vec<(String, String)>, key: &str, value: &str| {
        if let Some(slot) = params.iter_mut().find(|(k, _)| k == key) {
            slot.1 = value.to_string();
        }
    };
    match options.safesearch {
        SafeSearch::On => set(&mut params, "p", "1"),
        SafeSearch::Moderate => set(&mut params, "ex", "-1"),
        SafeSearch::Off => set(&mut params, "ex", "-2"),
    }

    for (key, value) in &options.extra {
        match params.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value.clone(),
            None => params.push((key.clone(), value.clone())),
        }
    }
    params
}

/// Parse a `d.js` payload into result records.
///
/// A payload without the page-layout call holds no results. Rows carrying
/// the `n` key are next-page markers and rows pointing at DuckDuckGo's ad
/// redirector are dropped; rows that are not JSON objects are skipped.
pub(crate) fn parse_results(body: &str) -> Result<Vec<TextResult>, SearchError> {
    let Some(start) = body.find(PAGE_LAYOUT_MARKER).map(|i| i + PAGE_LAYOUT_MARKER.len()) else {
        tracing::debug!("d.js payload has no result block");
        return Ok(Vec::new());
    };
    let rest = &body[start..];
    let end = rest
        .find(DUCKBAR_MARKER)
        .or_else(|| rest.rfind("]);").map(|i| i + 1))
        .ok_or_else(|| SearchError::Parse("unterminated d.js result block".into()))?;

    let rows: Vec<serde_json::Value> = serde_json::from_str(rest[..end].trim())
        .map_err(|e| SearchError::Parse(format!("invalid d.js result block: {e}")))?;

    let mut results = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let Some(obj) = row.as_object() else {
            tracing::warn!(index, "skipping non-object d.js row");
            continue;
        };
        if obj.contains_key("n") {
            continue;
        }
        let field = |key: &str| obj.get(key).and_then(serde_json::Value::as_str);
        let href = field("u").map(str::to_owned);
        if href
            .as_deref()
            .is_some_and(|h| h.starts_with("https://duckduckgo.com/y.js"))
        {
            continue;
        }
        results.push(TextResult {
            title: field("t").map(plain_text),
            href,
            body: field("a").map(plain_text),
        });
    }

    tracing::debug!(count = results.len(), "d.js results parsed");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOCK_DJS: &str = r#"if (DDG.deep && DDG.deep.setUpstream) DDG.deep.setUpstream("bingv7aa");DDG.pageLayout.load('d',[{"a":"A language empowering everyone to build <b>reliable</b> and efficient software.","t":"Rust Programming Language","u":"https://www.rust-lang.org/"},{"a":"Learn &amp; explore.","t":"The <b>Rust</b> Book","u":"https://doc.rust-lang.org/book/"},{"t":"No body","u":"https://example.com/nobody"},{"n":"/d.js?q=rust&s=3&vqd=4-123"}]);DDG.duckbar.load('images');"#;

    #[test]
    fn extract_vqd_double_quoted() {
        let html = r#"<script>var x = {vqd="4-1234567890",k:1};</script>"#;
        assert_eq!(extract_vqd(html).as_deref(), Some("4-1234567890"));
    }

    #[test]
    fn extract_vqd_ampersand_terminated() {
        let html = "/d.js?q=rust&vqd=4-987&kl=wt-wt";
        assert_eq!(extract_vqd(html).as_deref(), Some("4-987"));
    }

    #[test]
    fn extract_vqd_single_quoted() {
        let html = "nrj('/d.js', vqd='4-555')";
        assert_eq!(extract_vqd(html).as_deref(), Some("4-555"));
    }

    #[test]
    fn extract_vqd_missing() {
        assert!(extract_vqd("<html><body>nothing</body></html>").is_none());
    }

    #[test]
    fn params_for_moderate_default() {
        let params = build_params("rust", "4-1", &TextOptions::default());
        let get = |k: &str| params.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("q"), Some("rust"));
        assert_eq!(get("kl"), Some("wt-wt"));
        assert_eq!(get("vqd"), Some("4-1"));
        assert_eq!(get("ex"), Some("-1"));
        assert_eq!(get("p"), Some(""));
        assert_eq!(get("s"), Some("0"));
    }

    #[test]
    fn params_for_safesearch_on_and_off() {
        let on = build_params("q", "v", &TextOptions::new().with_safesearch(SafeSearch::On));
        assert!(on.contains(&("p".into(), "1".into())));
        assert!(on.contains(&("ex".into(), String::new())));

        let off = build_params("q", "v", &TextOptions::new().with_safesearch(SafeSearch::Off));
        assert!(off.contains(&("ex".into(), "-2".into())));
    }

    #[test]
    fn params_forward_extras_and_timelimit() {
        let opts = TextOptions::new()
            .with_region("us-en")
            .with_extra("timelimit", "m")
            .with_extra("extra_opt", "x");
        let params = build_params("q", "v", &opts);
        assert!(params.contains(&("df".into(), "m".into())));
        assert!(params.contains(&("kl".into(), "us-en".into())));
        assert!(params.contains(&("bing_market".into(), "en-US".into())));
        assert!(params.contains(&("extra_opt".into(), "x".into())));
    }

    #[test]
    fn parse_mock_payload() {
        let results = parse_results(MOCK_DJS).expect("should parse");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title.as_deref(), Some("Rust Programming Language"));
        assert_eq!(results[0].href.as_deref(), Some("https://www.rust-lang.org/"));
        assert_eq!(
            results[0].body.as_deref(),
            Some("A language empowering everyone to build reliable and efficient software.")
        );
        assert_eq!(results[1].title.as_deref(), Some("The Rust Book"));
        assert_eq!(results[1].body.as_deref(), Some("Learn & explore."));
        assert!(results[2].body.is_none());
    }

    #[test]
    fn parse_without_duckbar_suffix() {
        let body = r#"DDG.pageLayout.load('d',[{"t":"A","u":"http://a","a":"x"}]);"#;
        let results = parse_results(body).expect("should parse");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].href.as_deref(), Some("http://a"));
    }

    #[test]
    fn parse_skips_ads_and_non_objects() {
        let body = r#"DDG.pageLayout.load('d',[{"t":"Ad","u":"https://duckduckgo.com/y.js?ad=1"},42,{"t":"Real","u":"http://real"}]);"#;
        let results = parse_results(body).expect("should parse");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title.as_deref(), Some("Real"));
    }

    #[test]
    fn parse_payload_without_results_is_empty() {
        let results = parse_results("DDG.deep.anchor();").expect("should parse");
        assert!(results.is_empty());
    }

    #[test]
    fn parse_malformed_block_is_error() {
        let err = parse_results("DDG.pageLayout.load('d',[{\"t\":]);").unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }
}
