//! # Search Helpers Repository
//!
//! Client-side helpers over a search cluster's bulk and scroll protocols:
//!
//! - [`BulkBuffer`] batches write operations into bulk requests, flushing
//!   automatically once a threshold is reached and reporting failed items.
//! - [`PageCursor`] and [`HitCursor`] walk a scrolled search page by page or
//!   hit by hit, managing the scroll context along the way.
//!
//! The cluster itself is reached through the [`ClusterClient`] trait, with
//! an OpenSearch implementation in [`opensearch`].

pub mod bulk;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod scroll;

#[cfg(test)]
mod mock;

pub use bulk::{BulkBuffer, BulkFactory, ChannelNotifier, TracingNotifier};
pub use config::{BulkConfig, ScrollConfig};
pub use errors::{BulkError, ClusterError, PartialFailure, ScrollError};
pub use interfaces::{BulkFlushNotifier, ClusterClient};
pub use crate::opensearch::OpenSearchClusterClient;
pub use scroll::{HitCursor, PageCursor};
