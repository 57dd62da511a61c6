//! # Search Helpers Shared
//!
//! Plain data types exchanged between the bulk/scroll helpers and the
//! cluster client implementations.

mod bulk;
mod event;
mod page;

pub use bulk::{BulkAction, BulkItemFailure, BulkRequest, BulkResponse, OperationKind};
pub use event::BulkFlushEvent;
pub use page::{Hits, Page, SearchParams};
