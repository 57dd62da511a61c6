//! Scripted cluster client and notifier used by the unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::{BulkError, ClusterError};
use crate::interfaces::{BulkFlushNotifier, ClusterClient};
use search_helpers_shared::{BulkFlushEvent, BulkRequest, BulkResponse, Page, SearchParams};

/// Mock cluster client replaying queued responses and recording every call.
///
/// Empty queues answer with an empty page or a clean bulk response.
#[derive(Default)]
pub(crate) struct MockClusterClient {
    search_results: Mutex<VecDeque<Result<Page, ClusterError>>>,
    scroll_results: Mutex<VecDeque<Result<Page, ClusterError>>>,
    bulk_results: Mutex<VecDeque<Result<BulkResponse, ClusterError>>>,
    clear_results: Mutex<VecDeque<Result<(), ClusterError>>>,
    pub searches: Mutex<Vec<SearchParams>>,
    pub scrolls: Mutex<Vec<(String, Option<String>)>>,
    pub cleared: Mutex<Vec<String>>,
    pub bulk_requests: Mutex<Vec<BulkRequest>>,
    pub bulk_calls: AtomicUsize,
}

impl MockClusterClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, result: Result<Page, ClusterError>) -> Self {
        self.search_results.get_mut().push_back(result);
        self
    }

    pub fn with_scroll(mut self, result: Result<Page, ClusterError>) -> Self {
        self.scroll_results.get_mut().push_back(result);
        self
    }

    pub fn with_bulk(mut self, result: Result<BulkResponse, ClusterError>) -> Self {
        self.bulk_results.get_mut().push_back(result);
        self
    }

    pub fn with_clear(mut self, result: Result<(), ClusterError>) -> Self {
        self.clear_results.get_mut().push_back(result);
        self
    }

    pub fn bulk_call_count(&self) -> usize {
        self.bulk_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClusterClient for MockClusterClient {
    async fn search(&self, params: &SearchParams) -> Result<Page, ClusterError> {
        self.searches.lock().await.push(params.clone());
        self.search_results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Page::empty()))
    }

    async fn scroll(&self, scroll_id: &str, ttl: Option<&str>) -> Result<Page, ClusterError> {
        self.scrolls
            .lock()
            .await
            .push((scroll_id.to_string(), ttl.map(str::to_string)));
        self.scroll_results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(Page::empty()))
    }

    async fn clear_scroll(&self, scroll_id: &str) -> Result<(), ClusterError> {
        self.cleared.lock().await.push(scroll_id.to_string());
        self.clear_results.lock().await.pop_front().unwrap_or(Ok(()))
    }

    async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, ClusterError> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        self.bulk_requests.lock().await.push(request.clone());
        self.bulk_results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Ok(BulkResponse::ok(vec![])))
    }
}

/// Notifier recording events together with the number of bulk calls the
/// client had seen when each event arrived.
pub(crate) struct RecordingNotifier {
    client: Arc<MockClusterClient>,
    pub events: std::sync::Mutex<Vec<(BulkFlushEvent, usize)>>,
    should_fail: bool,
}

impl RecordingNotifier {
    pub fn new(client: Arc<MockClusterClient>) -> Self {
        Self {
            client,
            events: std::sync::Mutex::new(Vec::new()),
            should_fail: false,
        }
    }

    pub fn failing(client: Arc<MockClusterClient>) -> Self {
        Self {
            should_fail: true,
            ..Self::new(client)
        }
    }

    pub fn recorded(&self) -> Vec<(BulkFlushEvent, usize)> {
        self.events.lock().unwrap().clone()
    }
}

impl BulkFlushNotifier for RecordingNotifier {
    fn on_bulk_flush(&self, event: &BulkFlushEvent) -> Result<(), BulkError> {
        if self.should_fail {
            return Err(BulkError::notifier("Mock failure"));
        }
        self.events
            .lock()
            .unwrap()
            .push((event.clone(), self.client.bulk_call_count()));
        Ok(())
    }
}
