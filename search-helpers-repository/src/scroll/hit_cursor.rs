//! Hit-level cursor flattening scrolled pages.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::errors::ScrollError;
use crate::scroll::PageCursor;

/// Forward-only cursor over the individual hits of a scrolled search.
///
/// Pages are fetched lazily from the wrapped `PageCursor` as the cursor
/// moves past the last hit of the current page. Empty pages are skipped;
/// the cursor is exhausted once the page cursor reports no more results.
///
/// `key()` is the index of the hit within its page and restarts at 0 on
/// every page; `position()` counts hits across all pages.
///
/// After an error the cursor has to be started again.
pub struct HitCursor {
    pages: PageCursor,
    hit_index: usize,
    position: usize,
    current: Option<Value>,
    started: bool,
}

impl HitCursor {
    /// Wrap a page cursor. Nothing is fetched until `start()`.
    pub fn new(pages: PageCursor) -> Self {
        Self {
            pages,
            hit_index: 0,
            position: 0,
            current: None,
            started: false,
        }
    }

    pub fn pages(&self) -> &PageCursor {
        &self.pages
    }

    pub fn pages_mut(&mut self) -> &mut PageCursor {
        &mut self.pages
    }

    /// Set the scroll time-to-live of the wrapped page cursor.
    pub fn set_ttl(&mut self, ttl: impl Into<String>) {
        self.pages.set_ttl(ttl);
    }

    /// Release the scroll context of the wrapped page cursor.
    pub async fn release(&mut self) -> Result<(), ScrollError> {
        self.pages.release().await
    }

    /// Run the search and position the cursor on the first hit.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), ScrollError> {
        self.started = false;
        self.current = None;
        self.position = 0;
        self.hit_index = 0;

        self.pages.start().await?;
        self.started = true;

        let result = self.read_page_data().await;
        self.reset_on_error(result)
    }

    /// Move to the next hit, fetching the next page when the current one is
    /// used up. Advancing an exhausted cursor does nothing.
    pub async fn advance(&mut self) -> Result<(), ScrollError> {
        if !self.started {
            return Err(ScrollError::NotStarted);
        }
        if self.current.is_none() {
            return Ok(());
        }

        let next_index = self.hit_index + 1;
        if let Some(hit) = self.pages.current()?.hit(next_index).cloned() {
            self.hit_index = next_index;
            self.position += 1;
            self.current = Some(hit);
            return Ok(());
        }

        let result = self.next_page().await;
        self.reset_on_error(result)?;

        if self.current.is_some() {
            self.position += 1;
        }
        Ok(())
    }

    /// Whether the cursor is positioned on a hit.
    pub fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    /// The current hit.
    pub fn current(&self) -> Result<&Value, ScrollError> {
        if !self.started {
            return Err(ScrollError::NotStarted);
        }
        self.current.as_ref().ok_or(ScrollError::Exhausted)
    }

    /// The current hit deserialized into `T`.
    pub fn current_as<T: DeserializeOwned>(&self) -> Result<T, ScrollError> {
        let hit = self.current()?;
        serde_json::from_value(hit.clone())
            .map_err(|e| ScrollError::decode(e.to_string()))
    }

    /// Index of the current hit within its page.
    pub fn key(&self) -> usize {
        self.hit_index
    }

    /// Index of the current hit across all pages.
    pub fn position(&self) -> usize {
        self.position
    }

    async fn next_page(&mut self) -> Result<(), ScrollError> {
        self.pages.advance().await?;
        self.read_page_data().await
    }

    /// Load the first hit of the current page, moving past empty pages.
    ///
    /// Only the first page can be empty and still valid, so this issues at
    /// most one extra scroll call.
    async fn read_page_data(&mut self) -> Result<(), ScrollError> {
        loop {
            if !self.pages.is_valid() {
                debug!(hits = self.position, "Scroll results exhausted");
                self.current = None;
                return Ok(());
            }

            if let Some(hit) = self.pages.current()?.hit(0).cloned() {
                self.hit_index = 0;
                self.current = Some(hit);
                return Ok(());
            }

            debug!(page = self.pages.key(), "Skipping empty page");
            self.pages.advance().await?;
        }
    }

    fn reset_on_error(&mut self, result: Result<(), ScrollError>) -> Result<(), ScrollError> {
        if result.is_err() {
            self.started = false;
            self.current = None;
        }
        result
    }
}
