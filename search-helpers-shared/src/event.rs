//! Bulk flush notification payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Emitted whenever a bulk buffer sends its pending operations.
///
/// Only non-empty flushes produce an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkFlushEvent {
    /// The index data was flushed to.
    pub index: String,
    /// The type of data flushed.
    pub doc_type: Option<String>,
    /// The number of items flushed.
    pub row_count: usize,
    /// When the flush was started.
    pub flushed_at: DateTime<Utc>,
}

impl BulkFlushEvent {
    /// Create an event stamped with the current time.
    pub fn new(index: impl Into<String>, doc_type: Option<String>, row_count: usize) -> Self {
        Self {
            index: index.into(),
            doc_type,
            row_count,
            flushed_at: Utc::now(),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn doc_type(&self) -> Option<&str> {
        self.doc_type.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }
}
