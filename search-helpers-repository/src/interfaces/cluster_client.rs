//! Cluster client trait definition.
//!
//! This module defines the narrow interface the bulk and scroll helpers use
//! to reach the search cluster, allowing different backend implementations
//! (OpenSearch, mocks in tests, ...).

use async_trait::async_trait;

use crate::errors::ClusterError;
use search_helpers_shared::{BulkRequest, BulkResponse, Page, SearchParams};

/// Abstract interface for the search, scroll and bulk endpoints of a cluster.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so helpers holding them can be
/// moved across async tasks.
///
/// # Error Handling
///
/// Implementations report transport and protocol failures as
/// `ClusterError`. Callers never retry; the error reaches the caller as is.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Execute the initial search of a (possibly scrolled) query.
    ///
    /// # Arguments
    ///
    /// * `params` - Indices, body, page size and optional scroll time-to-live
    ///
    /// # Returns
    ///
    /// * `Ok(Page)` - The first page, carrying a scroll id when `params.scroll` was set
    /// * `Err(ClusterError)` - If the search fails
    async fn search(&self, params: &SearchParams) -> Result<Page, ClusterError>;

    /// Fetch the next page of a scroll session.
    ///
    /// # Arguments
    ///
    /// * `scroll_id` - Continuation token of the previous page
    /// * `ttl` - Time-to-live to extend the scroll context by
    async fn scroll(&self, scroll_id: &str, ttl: Option<&str>) -> Result<Page, ClusterError>;

    /// Release a scroll context on the cluster.
    async fn clear_scroll(&self, scroll_id: &str) -> Result<(), ClusterError>;

    /// Send a bulk request.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkResponse)` - The response, which may still report failed items
    /// * `Err(ClusterError)` - If the request as a whole fails
    async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, ClusterError>;
}
