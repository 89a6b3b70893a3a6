//! Normalized search documents and the component output.

use ddg_search::TextResult;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// One search hit, normalized for downstream pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// SHA-256 hex digest of title, content and link.
    pub id: String,
    /// Result title.
    pub title: String,
    /// Snippet text.
    pub content: String,
    /// Result URL.
    pub link: String,
}

impl Document {
    /// Create a document, deriving its id from the fields.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        let (title, content, link) = (title.into(), content.into(), link.into());
        let id = document_id(&title, &content, &link);
        Self {
            id,
            title,
            content,
            link,
        }
    }

    /// Normalize a backend record. Missing fields become empty strings.
    pub fn from_record(record: &TextResult) -> Self {
        Self::new(
            record.title.clone().unwrap_or_default(),
            record.body.clone().unwrap_or_default(),
            record.href.clone().unwrap_or_default(),
        )
    }
}

fn document_id(title: &str, content: &str, link: &str) -> String {
    let mut hasher = Sha256::new();
    for part in [title, content, link] {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    let digest = hasher.finalize();
    format!("{digest:x}")
}

/// Output of one [`crate::DuckDuckGoWebSearch::run`] call.
///
/// `documents` and `links` have equal length and share the backend's
/// ranking order; `links[i]` is `documents[i].link`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSearchOutput {
    /// Normalized documents.
    pub documents: Vec<Document>,
    /// Result URLs.
    pub links: Vec<String>,
}

impl WebSearchOutput {
    /// Build the output from backend records, preserving their order.
    pub fn from_records(records: &[TextResult]) -> Self {
        let documents: Vec<Document> = records.iter().map(Document::from_record).collect();
        let links = documents.iter().map(|d| d.link.clone()).collect();
        Self { documents, links }
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the search returned nothing.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
