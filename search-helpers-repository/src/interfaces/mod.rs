//! Interface definitions for the cluster client and flush notifier.
//!
//! These traits are the only seams of the helpers: everything that talks to
//! the network or observes flushes is injected through them.

mod bulk_flush_notifier;
mod cluster_client;

pub use bulk_flush_notifier::BulkFlushNotifier;
pub use cluster_client::ClusterClient;
