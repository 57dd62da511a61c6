//! Bulk write batching.

mod buffer;
mod factory;
mod notifier;

pub use buffer::BulkBuffer;
pub use factory::BulkFactory;
pub use notifier::{ChannelNotifier, TracingNotifier};
