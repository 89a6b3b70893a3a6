//! Text clean-up for result titles and snippets.
//!
//! DuckDuckGo returns titles and bodies with inline markup (`<b>` around
//! matched terms) and HTML entities. Both are removed here so callers get
//! plain text.

use scraper::Html;

/// Strip HTML tags, decode entities and collapse whitespace.
pub fn plain_text(raw: &str) -> String {
    if !raw.contains('<') && !raw.contains('&') {
        return collapse_whitespace(raw);
    }
    let fragment = Html::parse_fragment(raw);
    let text: String = fragment.root_element().text().collect();
    collapse_whitespace(&text)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
