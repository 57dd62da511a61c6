//! Page-level scroll cursor.
//!
//! Wraps one scroll-search session: the initial search yields the first
//! page, every advance fetches the next page with the latest scroll id.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::errors::ScrollError;
use crate::interfaces::ClusterClient;
use search_helpers_shared::{Page, SearchParams};

/// Forward-only cursor over the pages of a scrolled search.
///
/// ```ignore
/// let params = SearchParams::new("logs").with_scroll("1m").with_size(500);
/// let mut pages = PageCursor::new(client, params);
///
/// pages.start().await?;
/// while pages.is_valid() {
///     handle(pages.current()?);
///     pages.advance().await?;
/// }
/// pages.release().await?;
/// ```
///
/// The scroll context stays open on the cluster until `release()` is called
/// or it expires; call `release()` when stopping early.
pub struct PageCursor {
    client: Arc<dyn ClusterClient>,
    params: SearchParams,
    page_index: usize,
    page: Option<Page>,
    scroll_id: Option<String>,
    scroll_ttl: Option<String>,
}

impl PageCursor {
    /// Create a cursor for the given search. The scroll time-to-live is
    /// taken from `params.scroll`.
    pub fn new(client: Arc<dyn ClusterClient>, params: SearchParams) -> Self {
        let scroll_ttl = params.scroll.clone();
        Self {
            client,
            params,
            page_index: 0,
            page: None,
            scroll_id: None,
            scroll_ttl,
        }
    }

    /// Set the time-to-live used by subsequent `advance()` calls.
    pub fn set_ttl(&mut self, ttl: impl Into<String>) {
        self.scroll_ttl = Some(ttl.into());
    }

    pub fn ttl(&self) -> Option<&str> {
        self.scroll_ttl.as_deref()
    }

    /// Continuation token of the current page, if a scroll context is open.
    pub fn scroll_id(&self) -> Option<&str> {
        self.scroll_id.as_deref()
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Whether `start()` has completed at least once.
    pub fn is_started(&self) -> bool {
        self.page.is_some()
    }

    /// Run the initial search, releasing any scroll context still open.
    ///
    /// The old context is released before the new search is sent.
    #[instrument(skip(self), fields(indices = ?self.params.indices))]
    pub async fn start(&mut self) -> Result<(), ScrollError> {
        self.release().await?;

        self.page_index = 0;
        self.page = None;

        let page = self.client.search(&self.params).await?;
        self.scroll_id = continuation_token(&page);

        debug!(
            hits = page.hits().len(),
            scroll_id = ?self.scroll_id,
            "Fetched first page"
        );

        self.page = Some(page);
        Ok(())
    }

    /// Fetch the next page.
    ///
    /// Without a continuation token (a search that did not open a scroll
    /// context) there is no next page: the cursor moves onto an empty page
    /// without calling the cluster.
    pub async fn advance(&mut self) -> Result<(), ScrollError> {
        if self.page.is_none() {
            return Err(ScrollError::NotStarted);
        }

        let page = match self.scroll_id.as_deref() {
            Some(scroll_id) => {
                self.client
                    .scroll(scroll_id, self.scroll_ttl.as_deref())
                    .await?
            }
            None => {
                debug!("No scroll context, no further pages");
                Page::empty()
            }
        };

        self.page_index += 1;
        self.scroll_id = continuation_token(&page);

        debug!(
            page_index = self.page_index,
            hits = page.hits().len(),
            "Fetched scroll page"
        );

        self.page = Some(page);
        Ok(())
    }

    /// Whether the current page holds results.
    ///
    /// The first page is always valid, even without hits: a scroll may
    /// start with an empty page and still deliver hits afterwards.
    pub fn is_valid(&self) -> bool {
        match self.page {
            Some(ref page) => self.page_index == 0 || !page.is_empty(),
            None => false,
        }
    }

    /// The last fetched page.
    pub fn current(&self) -> Result<&Page, ScrollError> {
        self.page.as_ref().ok_or(ScrollError::NotStarted)
    }

    /// Page number of the current page, starting at 0.
    pub fn key(&self) -> usize {
        self.page_index
    }

    /// Release the scroll context, if one is held.
    ///
    /// The token is forgotten before the clear call is sent, so a second
    /// call is a no-op even if the first one failed.
    pub async fn release(&mut self) -> Result<(), ScrollError> {
        if let Some(scroll_id) = self.scroll_id.take() {
            debug!(scroll_id = %scroll_id, "Clearing scroll context");
            self.client.clear_scroll(&scroll_id).await?;
        }
        Ok(())
    }
}

impl Drop for PageCursor {
    fn drop(&mut self) {
        if let Some(ref scroll_id) = self.scroll_id {
            warn!(
                scroll_id = %scroll_id,
                "Page cursor dropped without releasing its scroll context"
            );
        }
    }
}

fn continuation_token(page: &Page) -> Option<String> {
    page.scroll_id.clone().filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClusterError;
    use crate::mock::MockClusterClient;
    use serde_json::json;

    fn params() -> SearchParams {
        SearchParams::new("index").with_scroll("1m")
    }

    fn page(scroll_id: &str, hits: Vec<serde_json::Value>) -> Page {
        Page::new(Some(scroll_id.to_string()), hits)
    }

    #[test]
    fn test_scroll_ttl_is_adjustable() {
        let client = Arc::new(MockClusterClient::new());
        let mut cursor = PageCursor::new(client, params());
        assert_eq!(cursor.ttl(), Some("1m"));

        cursor.set_ttl("5m");

        assert_eq!(cursor.ttl(), Some("5m"));
    }

    #[tokio::test]
    async fn test_release_without_scroll_id_does_nothing() {
        let client = Arc::new(MockClusterClient::new());
        let mut cursor = PageCursor::new(client.clone(), params());

        cursor.release().await.unwrap();

        assert!(client.cleared.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_release_clears_scroll_once() {
        let client = Arc::new(
            MockClusterClient::new().with_search(Ok(page("foo-scroll-id", vec![]))),
        );
        let mut cursor = PageCursor::new(client.clone(), params());

        cursor.start().await.unwrap();
        cursor.release().await.unwrap();
        cursor.release().await.unwrap();

        assert_eq!(*client.cleared.lock().await, vec!["foo-scroll-id".to_string()]);
        assert!(cursor.scroll_id().is_none());
    }

    #[tokio::test]
    async fn test_failed_release_is_not_repeated() {
        let client = Arc::new(
            MockClusterClient::new()
                .with_search(Ok(page("foo-scroll-id", vec![])))
                .with_clear(Err(ClusterError::clear_scroll("timeout"))),
        );
        let mut cursor = PageCursor::new(client.clone(), params());

        cursor.start().await.unwrap();
        assert!(cursor.release().await.is_err());
        cursor.release().await.unwrap();

        assert_eq!(client.cleared.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_start_reruns_search_and_releases_previous_context() {
        let client = Arc::new(
            MockClusterClient::new()
                .with_search(Ok(page("foo-scroll-id", vec![])))
                .with_search(Ok(page("bar-scroll-id", vec![]))),
        );
        let mut cursor = PageCursor::new(client.clone(), params());

        cursor.start().await.unwrap();
        cursor.start().await.unwrap();

        assert_eq!(cursor.scroll_id(), Some("bar-scroll-id"));
        assert_eq!(*client.cleared.lock().await, vec!["foo-scroll-id".to_string()]);
        assert_eq!(client.searches.lock().await.len(), 2);
        assert_eq!(client.searches.lock().await[0], params());

        cursor.release().await.unwrap();
    }

    #[tokio::test]
    async fn test_advance_scrolls_with_latest_id_and_ttl() {
        let client = Arc::new(
            MockClusterClient::new()
                .with_search(Ok(page("foo-scroll-id", vec![json!({"_id": "1"})])))
                .with_scroll(Ok(page("bar-scroll-id", vec![json!({"_id": "2"})])))
                .with_scroll(Ok(page("baz-scroll-id", vec![]))),
        );
        let mut cursor = PageCursor::new(client.clone(), params());

        cursor.start().await.unwrap();
        cursor.advance().await.unwrap();
        cursor.set_ttl("5m");
        cursor.advance().await.unwrap();

        assert_eq!(
            *client.scrolls.lock().await,
            vec![
                ("foo-scroll-id".to_string(), Some("1m".to_string())),
                ("bar-scroll-id".to_string(), Some("5m".to_string())),
            ]
        );
        assert_eq!(cursor.scroll_id(), Some("baz-scroll-id"));
        assert_eq!(cursor.key(), 2);

        cursor.release().await.unwrap();
    }

    #[tokio::test]
    async fn test_first_page_is_valid_without_hits() {
        let client = Arc::new(MockClusterClient::new().with_search(Ok(page("s", vec![]))));
        let mut cursor = PageCursor::new(client, params());

        cursor.start().await.unwrap();

        assert!(cursor.is_valid());
        assert_eq!(cursor.key(), 0);
        assert!(cursor.current().unwrap().is_empty());

        cursor.release().await.unwrap();
    }

    #[tokio::test]
    async fn test_later_page_validity_depends_on_hits() {
        let client = Arc::new(
            MockClusterClient::new()
                .with_search(Ok(page("s", vec![json!({"_id": "1"})])))
                .with_scroll(Ok(page("s", vec![json!({"_id": "2"})])))
                .with_scroll(Ok(page("s", vec![]))),
        );
        let mut cursor = PageCursor::new(client, params());

        cursor.start().await.unwrap();
        assert!(cursor.is_valid());

        cursor.advance().await.unwrap();
        assert!(cursor.is_valid());
        assert_eq!(cursor.current().unwrap().hit(0), Some(&json!({"_id": "2"})));

        cursor.advance().await.unwrap();
        assert!(!cursor.is_valid());

        cursor.release().await.unwrap();
    }

    #[tokio::test]
    async fn test_use_before_start_fails() {
        let client = Arc::new(MockClusterClient::new());
        let mut cursor = PageCursor::new(client.clone(), params());

        assert!(!cursor.is_valid());
        assert_eq!(cursor.current().unwrap_err(), ScrollError::NotStarted);
        assert_eq!(cursor.advance().await.unwrap_err(), ScrollError::NotStarted);
        assert!(client.scrolls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_advance_without_scroll_context_ends_results() {
        let client = Arc::new(
            MockClusterClient::new().with_search(Ok(Page::new(None, vec![json!({"_id": "1"})]))),
        );
        let mut cursor = PageCursor::new(client.clone(), SearchParams::new("index"));

        cursor.start().await.unwrap();
        cursor.advance().await.unwrap();

        assert!(!cursor.is_valid());
        assert!(client.scrolls.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_scroll_error_propagates_and_keeps_page() {
        let client = Arc::new(
            MockClusterClient::new()
                .with_search(Ok(page("s", vec![json!({"_id": "1"})])))
                .with_scroll(Err(ClusterError::scroll("search_context_missing_exception"))),
        );
        let mut cursor = PageCursor::new(client, params());

        cursor.start().await.unwrap();
        let err = cursor.advance().await.unwrap_err();

        assert_eq!(
            err,
            ScrollError::Cluster(ClusterError::scroll("search_context_missing_exception"))
        );
        assert_eq!(cursor.key(), 0);
        assert_eq!(cursor.scroll_id(), Some("s"));

        cursor.release().await.unwrap();
    }
}
