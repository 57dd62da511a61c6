//! Cluster client error types.
//!
//! This module defines the errors a `ClusterClient` reports for transport
//! or protocol failures. The bulk and scroll helpers pass them through
//! unchanged.

use thiserror::Error;

/// Errors that can occur while talking to the search cluster.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    /// Failed to establish connection to the cluster.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The initial search request failed.
    #[error("Search error: {0}")]
    SearchError(String),

    /// A scroll continuation request failed.
    #[error("Scroll error: {0}")]
    ScrollError(String),

    /// Releasing a scroll context failed.
    #[error("Clear scroll error: {0}")]
    ClearScrollError(String),

    /// The bulk request itself failed (as opposed to individual items).
    #[error("Bulk request error: {0}")]
    BulkError(String),

    /// Failed to parse a response from the cluster.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl ClusterError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a search error.
    pub fn search(msg: impl Into<String>) -> Self {
        Self::SearchError(msg.into())
    }

    /// Create a scroll error.
    pub fn scroll(msg: impl Into<String>) -> Self {
        Self::ScrollError(msg.into())
    }

    /// Create a clear scroll error.
    pub fn clear_scroll(msg: impl Into<String>) -> Self {
        Self::ClearScrollError(msg.into())
    }

    /// Create a bulk request error.
    pub fn bulk(msg: impl Into<String>) -> Self {
        Self::BulkError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
