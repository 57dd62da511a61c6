//! Bulk buffer error types.

use thiserror::Error;

use crate::errors::ClusterError;
use search_helpers_shared::BulkItemFailure;

/// Raised when at least some of the items in a bulk flush fail.
///
/// The operations of the failed flush stay buffered; flush again to resend
/// the whole batch or clear the buffer to drop it.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialFailure {
    /// Summary message.
    pub message: String,
    /// The failed items reported by the cluster, when it listed them.
    pub errors: Vec<BulkItemFailure>,
}

impl PartialFailure {
    /// Create a partial failure from the failed items of a response.
    pub fn new(message: impl Into<String>, errors: Vec<BulkItemFailure>) -> Self {
        Self {
            message: message.into(),
            errors,
        }
    }

    /// Number of failed items.
    pub fn failed_count(&self) -> usize {
        self.errors.len()
    }

    /// The failed items.
    pub fn error_list(&self) -> &[BulkItemFailure] {
        &self.errors
    }
}

impl std::fmt::Display for PartialFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} failed)", self.message, self.errors.len())
    }
}

/// Errors that can occur while buffering or flushing bulk operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BulkError {
    /// The cluster reported failed items.
    #[error("Partial failure: {0}")]
    PartialFailure(PartialFailure),

    /// The bulk call failed at the transport or protocol level.
    #[error(transparent)]
    Cluster(#[from] ClusterError),

    /// A document body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The flush notifier failed.
    #[error("Notifier error: {0}")]
    Notifier(String),
}

impl BulkError {
    /// Create a partial failure error.
    pub fn partial_failure(msg: impl Into<String>, errors: Vec<BulkItemFailure>) -> Self {
        Self::PartialFailure(PartialFailure::new(msg, errors))
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a notifier error.
    pub fn notifier(msg: impl Into<String>) -> Self {
        Self::Notifier(msg.into())
    }

    /// Check if this error reports failed items.
    pub fn is_partial_failure(&self) -> bool {
        matches!(self, Self::PartialFailure(_))
    }
}

impl From<serde_json::Error> for BulkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
