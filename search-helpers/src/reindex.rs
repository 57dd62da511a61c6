//! Copy every hit of a scrolled search into a bulk buffer.

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::ReindexError;
use search_helpers_repository::{BulkBuffer, HitCursor};

/// Outcome of a reindex run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReindexSummary {
    /// Hits written to the target.
    pub copied: usize,
    /// Hits without `_id` or `_source`.
    pub skipped: usize,
}

/// Scrolls a source index and writes each hit into a target bulk buffer.
pub struct Reindexer {
    hits: HitCursor,
    bulk: BulkBuffer,
}

impl Reindexer {
    pub fn new(hits: HitCursor, bulk: BulkBuffer) -> Self {
        Self { hits, bulk }
    }

    pub fn hits(&self) -> &HitCursor {
        &self.hits
    }

    pub fn bulk(&self) -> &BulkBuffer {
        &self.bulk
    }

    /// Run the copy to completion.
    ///
    /// The scroll context is released whether or not the copy succeeds.
    /// A copy error takes precedence over a release error.
    #[instrument(skip(self), fields(target_index = %self.bulk.index()))]
    pub async fn run(&mut self) -> Result<ReindexSummary, ReindexError> {
        let copied = self.copy_all().await;
        let released = self.release().await;

        let summary = copied?;
        released?;

        info!(
            copied = summary.copied,
            skipped = summary.skipped,
            "Reindex complete"
        );
        Ok(summary)
    }

    /// Release the scroll context of the source search.
    pub async fn release(&mut self) -> Result<(), ReindexError> {
        self.hits.release().await?;
        Ok(())
    }

    async fn copy_all(&mut self) -> Result<ReindexSummary, ReindexError> {
        let mut summary = ReindexSummary::default();

        self.bulk.begin().await?;
        self.hits.start().await?;

        while self.hits.is_valid() {
            let hit = self.hits.current()?;

            match (hit.get("_id").and_then(Value::as_str), hit.get("_source")) {
                (Some(id), Some(source)) => {
                    self.bulk.add_item(id, source).await?;
                    summary.copied += 1;
                }
                _ => {
                    warn!(position = self.hits.position(), "Skipping hit without _id or _source");
                    summary.skipped += 1;
                }
            }

            self.hits.advance().await?;
        }

        self.bulk.end().await?;
        Ok(summary)
    }
}
