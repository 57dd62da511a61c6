//! Reindex settings read from environment variables.

use std::env;
use std::str::FromStr;

use serde_json::Value;

use crate::ReindexError;
use search_helpers_repository::{BulkConfig, ScrollConfig};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Settings of one reindex run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub opensearch_url: String,
    pub source_index: String,
    pub target_index: String,
    pub target_type: Option<String>,
    /// Search body used to select the documents to copy.
    pub source_query: Option<Value>,
    pub bulk: BulkConfig,
    pub scroll: ScrollConfig,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `SOURCE_INDEX`: index to read from (required)
    /// - `TARGET_INDEX`: index to write to (required)
    /// - `TARGET_TYPE`: document type for the target (optional)
    /// - `SOURCE_QUERY`: JSON search body (default: match all)
    /// - `BULK_AUTO_FLUSH_THRESHOLD`: items per bulk request, 0 disables (default: 2500)
    /// - `SCROLL_TTL`: scroll context time-to-live (default: 1m)
    /// - `SCROLL_PAGE_SIZE`: hits per scroll page (default: 1000)
    pub fn from_env() -> Result<Self, ReindexError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReindexError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let required = |key: &str| {
            value(key).ok_or_else(|| ReindexError::config(format!("{} must be set", key)))
        };

        let opensearch_url =
            value("OPENSEARCH_URL").unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string());
        let source_index = required("SOURCE_INDEX")?;
        let target_index = required("TARGET_INDEX")?;
        let target_type = value("TARGET_TYPE");

        let source_query = value("SOURCE_QUERY")
            .map(|raw| {
                serde_json::from_str::<Value>(&raw)
                    .map_err(|e| ReindexError::config(format!("Invalid SOURCE_QUERY: {}", e)))
            })
            .transpose()?;

        let mut bulk = BulkConfig::default();
        if let Some(raw) = value("BULK_AUTO_FLUSH_THRESHOLD") {
            bulk.auto_flush_threshold = parse_number("BULK_AUTO_FLUSH_THRESHOLD", &raw)?;
        }

        let mut scroll = ScrollConfig::default();
        if let Some(ttl) = value("SCROLL_TTL") {
            scroll.ttl = ttl;
        }
        if let Some(raw) = value("SCROLL_PAGE_SIZE") {
            scroll.page_size = parse_number("SCROLL_PAGE_SIZE", &raw)?;
        }

        Ok(Self {
            opensearch_url,
            source_index,
            target_index,
            target_type,
            source_query,
            bulk,
            scroll,
        })
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T, ReindexError> {
    raw.trim().parse().map_err(|_| {
        ReindexError::config(format!(
            "{} must be a non-negative integer, got {:?}",
            key, raw
        ))
    })
}
