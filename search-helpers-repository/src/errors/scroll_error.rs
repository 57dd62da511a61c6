//! Scroll cursor error types.

use thiserror::Error;

use crate::errors::ClusterError;

/// Errors that can occur while iterating scrolled results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrollError {
    /// The cursor was read or advanced before `start()`.
    #[error("Cursor has not been started")]
    NotStarted,

    /// The cursor has no current hit because the results are exhausted.
    #[error("Cursor is exhausted")]
    Exhausted,

    /// The current hit could not be deserialized into the requested type.
    #[error("Failed to decode hit: {0}")]
    Decode(String),

    /// A search, scroll or clear scroll call failed.
    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

impl ScrollError {
    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
