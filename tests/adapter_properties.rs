//! Generated-input properties of the web search component.
//!
//! Configurations and result pages are generated with proptest and run
//! against a stub backend through `run_blocking`, so every case gets its
//! own runtime and no network.

use std::collections::BTreeMap;
use std::sync::Mutex;

use ddg_search::{SafeSearch, SearchError, TextOptions, TextResult};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use websearch::{DuckDuckGoWebSearch, SearchBackend, SearchParams, WebSearchConfig};

/// Serves fixed rows, truncated to `max_results` like the real client, and
/// records every call.
#[derive(Default)]
struct StubBackend {
    rows: Vec<Value>,
    calls: Mutex<Vec<(String, TextOptions)>>,
}

impl StubBackend {
    fn with_rows(rows: Vec<Value>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<(String, TextOptions)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl SearchBackend for StubBackend {
    async fn text(&self, query: &str, options: &TextOptions) -> Result<Vec<TextResult>, SearchError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((query.to_string(), options.clone()));
        }
        let mut records: Vec<TextResult> =
            self.rows.iter().filter_map(TextResult::from_value).collect();
        if let Some(max) = options.max_results {
            records.truncate(max);
        }
        Ok(records)
    }
}

/// One generated hit; any field may be missing.
#[derive(Debug, Clone)]
struct Row {
    title: Option<String>,
    href: Option<String>,
    answer: Option<String>,
}

impl Row {
    fn to_value(&self) -> Value {
        let mut obj = Map::new();
        if let Some(title) = &self.title {
            obj.insert("title".into(), json!(title));
        }
        if let Some(href) = &self.href {
            obj.insert("href".into(), json!(href));
        }
        if let Some(answer) = &self.answer {
            obj.insert("answer".into(), json!(answer));
        }
        Value::Object(obj)
    }
}

fn safesearch_strategy() -> impl Strategy<Value = SafeSearch> {
    prop_oneof![
        Just(SafeSearch::On),
        Just(SafeSearch::Moderate),
        Just(SafeSearch::Off),
    ]
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9]{0,8}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
    ]
}

fn search_params_strategy() -> impl Strategy<Value = SearchParams> {
    (
        proptest::option::of(safesearch_strategy()),
        proptest::option::of("[a-z]{2}-[a-z]{2}"),
        proptest::collection::btree_map("x_[a-z]{1,8}", scalar_strategy(), 0..4),
    )
        .prop_map(|(safesearch, region, extra)| SearchParams {
            safesearch,
            region,
            extra,
        })
}

fn config_strategy() -> impl Strategy<Value = WebSearchConfig> {
    (
        proptest::option::of(1usize..50),
        1u64..120,
        proptest::option::of(proptest::collection::btree_map(
            "X-[A-Za-z]{1,10}",
            "[a-zA-Z0-9]{1,20}",
            0..3,
        )),
        search_params_strategy(),
    )
        .prop_map(|(top_k, timeout, headers, search_params)| WebSearchConfig {
            top_k,
            timeout,
            headers,
            proxies: None,
            search_params,
        })
}

fn row_strategy() -> impl Strategy<Value = Row> {
    (
        proptest::option::of("[A-Za-z ]{0,12}"),
        proptest::option::of("http://[a-z]{1,8}\\.test/[a-z0-9]{0,6}"),
        proptest::option::of("[a-z ]{0,20}"),
    )
        .prop_map(|(title, href, answer)| Row {
            title,
            href,
            answer,
        })
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    proptest::collection::vec(row_strategy(), 0..30)
}

fn component(config: WebSearchConfig, rows: &[Row]) -> DuckDuckGoWebSearch<StubBackend> {
    let backend = StubBackend::with_rows(rows.iter().map(Row::to_value).collect());
    DuckDuckGoWebSearch::with_backend(config, backend).expect("valid component")
}

proptest! {
    #[test]
    fn round_trip_behaves_the_same(config in config_strategy(), rows in rows_strategy()) {
        let original = component(config.clone(), &rows);
        let envelope = original.to_config().expect("to_config");
        let backend = StubBackend::with_rows(rows.iter().map(Row::to_value).collect());
        let rebuilt = DuckDuckGoWebSearch::from_config_with_backend(&envelope, backend)
            .expect("from_config");

        prop_assert_eq!(rebuilt.config(), &config);
        prop_assert_eq!(rebuilt.to_config().expect("to_config"), envelope);

        let expected = original.run_blocking("same query").expect("original run");
        let actual = rebuilt.run_blocking("same query").expect("rebuilt run");
        prop_assert_eq!(expected, actual);
        prop_assert_eq!(original.backend().calls(), rebuilt.backend().calls());
    }

    #[test]
    fn output_is_bounded_and_parallel(top_k in proptest::option::of(1usize..40), rows in rows_strategy()) {
        let search = component(WebSearchConfig::new().with_top_k(top_k), &rows);
        let output = search.run_blocking("q").expect("run");

        prop_assert_eq!(output.documents.len(), output.links.len());
        if let Some(k) = top_k {
            prop_assert!(output.documents.len() <= k);
        }
        let expected_len = top_k.map_or(rows.len(), |k| rows.len().min(k));
        prop_assert_eq!(output.documents.len(), expected_len);
    }

    #[test]
    fn documents_follow_backend_order(rows in rows_strategy()) {
        let search = component(WebSearchConfig::new().with_top_k(None), &rows);
        let output = search.run_blocking("q").expect("run");

        prop_assert_eq!(output.documents.len(), rows.len());
        for ((doc, link), row) in output.documents.iter().zip(&output.links).zip(&rows) {
            prop_assert_eq!(&doc.title, &row.title.clone().unwrap_or_default());
            prop_assert_eq!(&doc.content, &row.answer.clone().unwrap_or_default());
            prop_assert_eq!(&doc.link, &row.href.clone().unwrap_or_default());
            prop_assert_eq!(link, &doc.link);
        }
    }

    #[test]
    fn search_params_are_forwarded_and_kept(config in config_strategy()) {
        let search = component(config.clone(), &[]);
        search.run_blocking("first").expect("run");
        search.run_blocking("second").expect("run");

        let calls = search.backend().calls();
        prop_assert_eq!(calls.len(), 2);
        prop_assert_eq!(&calls[0].1, &calls[1].1);

        let options = &calls[0].1;
        let params = &config.search_params;
        prop_assert_eq!(options.max_results, config.top_k);
        prop_assert_eq!(options.safesearch, params.safesearch.unwrap_or_default());
        prop_assert_eq!(options.region.as_str(), params.region.as_deref().unwrap_or("wt-wt"));

        let forwarded: BTreeMap<String, String> = params
            .extra
            .iter()
            .map(|(k, v)| {
                let text = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), text)
            })
            .collect();
        prop_assert_eq!(&options.extra, &forwarded);
        prop_assert_eq!(search.config(), &config);
    }
}
