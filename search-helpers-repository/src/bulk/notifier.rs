//! Ready-made flush notifiers.

use tokio::sync::mpsc;
use tracing::info;

use crate::errors::BulkError;
use crate::interfaces::BulkFlushNotifier;
use search_helpers_shared::BulkFlushEvent;

/// Logs every flush at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl BulkFlushNotifier for TracingNotifier {
    fn on_bulk_flush(&self, event: &BulkFlushEvent) -> Result<(), BulkError> {
        info!(
            index = %event.index,
            doc_type = ?event.doc_type,
            row_count = event.row_count,
            "Bulk flush"
        );
        Ok(())
    }
}

/// Forwards every flush event to an unbounded channel.
///
/// A closed receiver makes the flush fail.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<BulkFlushEvent>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<BulkFlushEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Wrap an existing sender.
    pub fn new(sender: mpsc::UnboundedSender<BulkFlushEvent>) -> Self {
        Self { sender }
    }
}

impl BulkFlushNotifier for ChannelNotifier {
    fn on_bulk_flush(&self, event: &BulkFlushEvent) -> Result<(), BulkError> {
        self.sender
            .send(event.clone())
            .map_err(|_| BulkError::notifier("Flush event receiver dropped"))
    }
}
