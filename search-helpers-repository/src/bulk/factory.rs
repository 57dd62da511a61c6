//! Factory for configured bulk buffers.

use std::sync::Arc;

use crate::bulk::BulkBuffer;
use crate::config::BulkConfig;
use crate::interfaces::{BulkFlushNotifier, ClusterClient};

/// Creates `BulkBuffer`s that share one cluster client, notifier and
/// configuration.
pub struct BulkFactory {
    client: Arc<dyn ClusterClient>,
    notifier: Option<Arc<dyn BulkFlushNotifier>>,
    config: BulkConfig,
}

impl BulkFactory {
    /// Create a factory with default configuration.
    pub fn new(client: Arc<dyn ClusterClient>) -> Self {
        Self {
            client,
            notifier: None,
            config: BulkConfig::default(),
        }
    }

    /// Create a factory with custom configuration.
    pub fn with_config(client: Arc<dyn ClusterClient>, config: BulkConfig) -> Self {
        Self {
            client,
            notifier: None,
            config,
        }
    }

    /// Set the notifier given to every buffer created afterwards.
    pub fn set_notifier(&mut self, notifier: Arc<dyn BulkFlushNotifier>) {
        self.notifier = Some(notifier);
    }

    pub fn config(&self) -> &BulkConfig {
        &self.config
    }

    /// Create a buffer for the given index and type.
    pub fn create_bulk(&self, index: impl Into<String>, doc_type: Option<String>) -> BulkBuffer {
        let bulk =
            BulkBuffer::with_config(self.client.clone(), index, doc_type, self.config.clone());

        match self.notifier {
            Some(ref notifier) => bulk.with_notifier(notifier.clone()),
            None => bulk,
        }
    }
}
