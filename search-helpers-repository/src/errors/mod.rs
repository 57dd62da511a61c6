//! Error types for the search helpers.

mod bulk_error;
mod cluster_error;
mod scroll_error;

pub use bulk_error::{BulkError, PartialFailure};
pub use cluster_error::ClusterError;
pub use scroll_error::ScrollError;
