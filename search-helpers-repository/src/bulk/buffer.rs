//! Bulk batching buffer.
//!
//! Collects write operations for one index/type and sends them to the
//! cluster as a single bulk request, either explicitly or automatically once
//! the configured number of items is reached.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::config::BulkConfig;
use crate::errors::BulkError;
use crate::interfaces::{BulkFlushNotifier, ClusterClient};
use search_helpers_shared::{BulkAction, BulkFlushEvent, BulkRequest};

/// Buffer of pending bulk operations.
///
/// The normal use is:
///
/// ```ignore
/// let mut bulk = BulkBuffer::new(client, "some-index", None);
///
/// bulk.begin().await?;
/// for doc in docs {
///     bulk.add_item(&doc.id, &doc).await?;
/// }
/// bulk.end().await?;
/// ```
///
/// `end()` (or `flush()`) is required after the last item so that anything
/// not covered by an automatic flush reaches the cluster.
///
/// Pending operations are only discarded once the cluster accepted the whole
/// batch. After a failed flush they are still buffered: flush again to
/// resend them, or `clear()` to drop them.
pub struct BulkBuffer {
    client: Arc<dyn ClusterClient>,
    notifier: Option<Arc<dyn BulkFlushNotifier>>,
    index: String,
    doc_type: Option<String>,
    auto_flush_threshold: usize,
    operations: Vec<Value>,
    item_count: usize,
}

impl BulkBuffer {
    /// Create a buffer for the given index and type with default configuration.
    pub fn new(
        client: Arc<dyn ClusterClient>,
        index: impl Into<String>,
        doc_type: Option<String>,
    ) -> Self {
        Self::with_config(client, index, doc_type, BulkConfig::default())
    }

    /// Create a buffer with custom configuration.
    pub fn with_config(
        client: Arc<dyn ClusterClient>,
        index: impl Into<String>,
        doc_type: Option<String>,
        config: BulkConfig,
    ) -> Self {
        Self {
            client,
            notifier: None,
            index: index.into(),
            doc_type,
            auto_flush_threshold: config.auto_flush_threshold,
            operations: Vec::new(),
            item_count: 0,
        }
    }

    /// Attach a flush notifier.
    pub fn with_notifier(mut self, notifier: Arc<dyn BulkFlushNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Replace the flush notifier.
    pub fn set_notifier(&mut self, notifier: Arc<dyn BulkFlushNotifier>) {
        self.notifier = Some(notifier);
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    pub fn doc_type(&self) -> Option<&str> {
        self.doc_type.as_deref()
    }

    pub fn auto_flush_threshold(&self) -> usize {
        self.auto_flush_threshold
    }

    /// Number of pending items.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Pending entries, alternating metadata and body.
    pub fn operations(&self) -> &[Value] {
        &self.operations
    }

    /// Add an `index` operation for a document.
    pub async fn add_item<T>(&mut self, id: impl Into<String>, body: &T) -> Result<(), BulkError>
    where
        T: Serialize + ?Sized,
    {
        self.add(BulkAction::index(id), body).await
    }

    /// Add an operation to the buffer.
    ///
    /// Flushes before returning when the auto-flush threshold is reached, so
    /// errors of that flush are returned from here.
    pub async fn add<T>(&mut self, action: BulkAction, body: &T) -> Result<(), BulkError>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;

        self.operations.push(action.to_metadata());
        self.operations.push(body);
        self.item_count += 1;

        if self.auto_flush_threshold > 0 && self.item_count >= self.auto_flush_threshold {
            debug!(
                index = %self.index,
                item_count = self.item_count,
                threshold = self.auto_flush_threshold,
                "Auto-flush threshold reached"
            );
            self.flush().await?;
        }

        Ok(())
    }

    /// Start a unit of work by flushing anything left over.
    pub async fn begin(&mut self) -> Result<(), BulkError> {
        self.flush().await
    }

    /// Finish a unit of work by flushing everything still pending.
    pub async fn end(&mut self) -> Result<(), BulkError> {
        self.flush().await
    }

    /// Drop all pending operations without sending them.
    pub fn clear(&mut self) {
        self.operations.clear();
        self.item_count = 0;
    }

    /// Send the pending operations to the cluster.
    ///
    /// Does nothing when the buffer is empty; in particular the notifier is
    /// not called. Otherwise the notifier is called first, then the bulk
    /// request is sent. A response reporting failed items yields
    /// `BulkError::PartialFailure`.
    #[instrument(skip(self), fields(index = %self.index, item_count = self.item_count))]
    pub async fn flush(&mut self) -> Result<(), BulkError> {
        if self.item_count == 0 {
            return Ok(());
        }

        let row_count = self.item_count;

        if let Some(ref notifier) = self.notifier {
            let event = BulkFlushEvent::new(self.index.clone(), self.doc_type.clone(), row_count);
            notifier.on_bulk_flush(&event)?;
        }

        // Pending operations stay in place until the cluster confirms the batch.
        let request = BulkRequest::new(
            self.index.clone(),
            self.doc_type.clone(),
            self.operations.clone(),
        );

        info!(row_count = row_count, "Flushing bulk operations");

        let response = self.client.bulk(&request).await.map_err(|e| {
            error!(error = %e, row_count = row_count, "Bulk request failed");
            BulkError::from(e)
        })?;

        if response.has_errors() {
            let failures = response.failures();
            warn!(
                row_count = row_count,
                failed = failures.len(),
                "Bulk flush reported failed items"
            );
            return Err(BulkError::partial_failure("Some items failed.", failures));
        }

        self.clear();
        debug!(row_count = row_count, took = response.took, "Bulk flush succeeded");
        Ok(())
    }
}

impl Drop for BulkBuffer {
    fn drop(&mut self) {
        if self.item_count > 0 {
            warn!(
                index = %self.index,
                item_count = self.item_count,
                "Bulk buffer dropped with unflushed items"
            );
        }
    }
}
