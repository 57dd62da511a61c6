//! Scrolled search iteration.
//!
//! `PageCursor` walks the pages of one scroll session; `HitCursor` flattens
//! those pages into a sequence of hits.

mod hit_cursor;
mod page_cursor;

pub use hit_cursor::HitCursor;
pub use page_cursor::PageCursor;
