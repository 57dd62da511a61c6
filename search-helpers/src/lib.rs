//! # Search Helpers
//!
//! Application wiring for the search cluster helpers: configuration from the
//! environment, logging setup, and a reindexer that scrolls one index and
//! bulk-writes every hit into another.

pub mod config;
pub mod reindex;
pub mod telemetry;

pub use config::{Dependencies, Settings};
pub use reindex::{ReindexSummary, Reindexer};

use thiserror::Error;

use search_helpers_repository::{BulkError, ClusterError, ScrollError};

/// Errors that can occur while configuring or running a reindex.
#[derive(Error, Debug)]
pub enum ReindexError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Writing to the target index failed.
    #[error("Bulk error: {0}")]
    BulkError(#[from] BulkError),

    /// Reading from the source index failed.
    #[error("Scroll error: {0}")]
    ScrollError(#[from] ScrollError),

    /// Cluster client error.
    #[error("Cluster error: {0}")]
    ClusterError(#[from] ClusterError),

    /// The reindex was interrupted.
    #[error("Reindex cancelled")]
    Cancelled,
}

impl ReindexError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
