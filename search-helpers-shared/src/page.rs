//! Search parameters and result pages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameters of the initial search of a scroll session.
///
/// The query body is passed through untouched; set `scroll` to open a
/// scroll context on the cluster.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchParams {
    /// Indices to search. Empty means all indices.
    pub indices: Vec<String>,
    /// Request body (query, sort, `_source` filtering, ...).
    pub body: Option<Value>,
    /// Scroll time-to-live, e.g. `"1m"`.
    pub scroll: Option<String>,
    /// Hits per page.
    pub size: Option<u64>,
}

impl SearchParams {
    /// Search a single index.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            indices: vec![index.into()],
            ..Default::default()
        }
    }

    /// Set the request body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the scroll time-to-live.
    pub fn with_scroll(mut self, ttl: impl Into<String>) -> Self {
        self.scroll = Some(ttl.into());
        self
    }

    /// Set the page size.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}

/// One search or scroll response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Continuation token for the next scroll call.
    #[serde(rename = "_scroll_id", default, skip_serializing_if = "Option::is_none")]
    pub scroll_id: Option<String>,
    /// The hits envelope.
    #[serde(default)]
    pub hits: Hits,
    /// Remaining response fields (`took`, `timed_out`, `_shards`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The `hits` object of a search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hits {
    /// Total hit count as reported by the cluster.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Value>,
    /// Hit records of this page.
    #[serde(default)]
    pub hits: Vec<Value>,
}

impl Page {
    /// Build a page from a continuation token and hit records.
    pub fn new(scroll_id: Option<String>, hits: Vec<Value>) -> Self {
        Self {
            scroll_id,
            hits: Hits { total: None, hits },
            extra: Map::new(),
        }
    }

    /// A page without hits or continuation token.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The hit records of this page.
    pub fn hits(&self) -> &[Value] {
        &self.hits.hits
    }

    pub fn hit(&self, index: usize) -> Option<&Value> {
        self.hits.hits.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.hits.hits.is_empty()
    }
}
