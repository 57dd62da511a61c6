//! Bulk flush observer hook.

use crate::errors::BulkError;
use search_helpers_shared::BulkFlushEvent;

/// Observer a `BulkBuffer` informs before each non-empty flush is sent.
///
/// An error returned here aborts the flush and reaches the caller of
/// `flush()`; the buffered operations are left untouched.
pub trait BulkFlushNotifier: Send + Sync {
    /// Called with the flush metadata, strictly before the bulk request.
    fn on_bulk_flush(&self, event: &BulkFlushEvent) -> Result<(), BulkError>;
}
