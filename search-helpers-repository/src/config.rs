//! Configuration types for the bulk and scroll helpers.

/// Default number of buffered items that triggers an automatic flush.
pub const DEFAULT_AUTO_FLUSH_THRESHOLD: usize = 2500;

/// Default scroll context time-to-live.
pub const DEFAULT_SCROLL_TTL: &str = "1m";

/// Default number of hits fetched per scroll page.
pub const DEFAULT_SCROLL_PAGE_SIZE: u64 = 1000;

/// Configuration for bulk buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkConfig {
    /// Number of items at which a flush happens automatically.
    /// Zero disables automatic flushing.
    pub auto_flush_threshold: usize,
}

impl Default for BulkConfig {
    fn default() -> Self {
        Self {
            auto_flush_threshold: DEFAULT_AUTO_FLUSH_THRESHOLD,
        }
    }
}

impl BulkConfig {
    /// Create a config that never flushes automatically.
    pub fn disabled_auto_flush() -> Self {
        Self {
            auto_flush_threshold: 0,
        }
    }

    /// Create a config with a custom auto-flush threshold.
    pub fn with_auto_flush_threshold(auto_flush_threshold: usize) -> Self {
        Self {
            auto_flush_threshold,
        }
    }
}

/// Configuration for scroll sessions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollConfig {
    /// Scroll context time-to-live, e.g. `"1m"`.
    pub ttl: String,
    /// Hits per page.
    pub page_size: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_SCROLL_TTL.to_string(),
            page_size: DEFAULT_SCROLL_PAGE_SIZE,
        }
    }
}
