//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `ClusterClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    BulkParts, ClearScrollParts, OpenSearch, ScrollParts, SearchParts,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::ClusterError;
use crate::interfaces::ClusterClient;
use search_helpers_shared::{BulkRequest, BulkResponse, Page, SearchParams};

/// OpenSearch-backed cluster client.
///
/// # Example
///
/// ```ignore
/// let client = Arc::new(OpenSearchClusterClient::new("http://localhost:9200")?);
/// let mut bulk = BulkBuffer::new(client.clone(), "articles", None);
/// ```
pub struct OpenSearchClusterClient {
    client: OpenSearch,
}

impl OpenSearchClusterClient {
    /// Create a new client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClusterClient)` - A new client instance
    /// * `Err(ClusterError)` - If the URL is invalid or transport setup fails
    pub fn new(url: &str) -> Result<Self, ClusterError> {
        let parsed_url = Url::parse(url).map_err(|e| ClusterError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| ClusterError::connection(e.to_string()))?;

        info!(url = %url, "Created OpenSearch cluster client");

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }

    /// Wrap an already configured OpenSearch client.
    pub fn from_client(client: OpenSearch) -> Self {
        Self { client }
    }

    /// Build the request body of a search.
    fn search_body(params: &SearchParams) -> Value {
        params.body.clone().unwrap_or_else(|| json!({}))
    }

    /// Build the request body of a scroll continuation.
    fn scroll_body(scroll_id: &str, ttl: Option<&str>) -> Value {
        let mut body = json!({ "scroll_id": scroll_id });
        if let Some(ttl) = ttl {
            body["scroll"] = json!(ttl);
        }
        body
    }

    /// Build the request body releasing a scroll context.
    fn clear_scroll_body(scroll_id: &str) -> Value {
        json!({ "scroll_id": [scroll_id] })
    }

    /// Build the NDJSON lines of a bulk request.
    ///
    /// Operations are metadata/body pairs. `_type` is removed from every
    /// metadata line and the placeholder body of a `delete` is not sent.
    fn bulk_lines(request: &BulkRequest) -> Vec<Value> {
        let mut lines = Vec::with_capacity(request.operations.len());

        for pair in request.operations.chunks(2) {
            let Some((metadata, rest)) = pair.split_first() else {
                continue;
            };

            let mut metadata = metadata.clone();
            let is_delete = metadata.get("delete").is_some();

            let action = metadata
                .as_object_mut()
                .and_then(|line| line.values_mut().next())
                .and_then(Value::as_object_mut);
            if let Some(doc_type) = action.and_then(|action| action.remove("_type")) {
                debug!(doc_type = %doc_type, "Dropping _type from bulk metadata");
            }

            lines.push(metadata);
            if !is_delete {
                lines.extend(rest.iter().cloned());
            }
        }

        lines
    }

    /// Check the status of a response and decode its body.
    async fn read_json<T: DeserializeOwned>(
        response: Response,
        on_error: fn(String) -> ClusterError,
    ) -> Result<T, ClusterError> {
        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Request failed");
            return Err(on_error(format!(
                "Request failed with status {}: {}",
                status, error_body
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ClusterError::parse(e.to_string()))
    }
}

#[async_trait]
impl ClusterClient for OpenSearchClusterClient {
    #[instrument(skip(self, params), fields(indices = ?params.indices))]
    async fn search(&self, params: &SearchParams) -> Result<Page, ClusterError> {
        let indices: Vec<&str> = params.indices.iter().map(String::as_str).collect();
        let parts = if indices.is_empty() {
            SearchParts::None
        } else {
            SearchParts::Index(&indices)
        };

        let mut request = self.client.search(parts).body(Self::search_body(params));
        if let Some(ref ttl) = params.scroll {
            request = request.scroll(ttl);
        }
        if let Some(size) = params.size {
            request = request.size(i64::try_from(size).unwrap_or(i64::MAX));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClusterError::search(e.to_string()))?;

        let page: Page = Self::read_json(response, ClusterError::SearchError).await?;
        debug!(hits = page.hits().len(), "Search completed");
        Ok(page)
    }

    async fn scroll(&self, scroll_id: &str, ttl: Option<&str>) -> Result<Page, ClusterError> {
        let response = self
            .client
            .scroll(ScrollParts::None)
            .body(Self::scroll_body(scroll_id, ttl))
            .send()
            .await
            .map_err(|e| ClusterError::scroll(e.to_string()))?;

        Self::read_json(response, ClusterError::ScrollError).await
    }

    async fn clear_scroll(&self, scroll_id: &str) -> Result<(), ClusterError> {
        let response = self
            .client
            .clear_scroll(ClearScrollParts::None)
            .body(Self::clear_scroll_body(scroll_id))
            .send()
            .await
            .map_err(|e| ClusterError::clear_scroll(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - the context may already have expired
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Clear scroll request failed");
            return Err(ClusterError::clear_scroll(format!(
                "Clear scroll failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(status = %status, "Scroll context cleared");
        Ok(())
    }

    #[instrument(skip(self, request), fields(index = %request.index, items = request.item_count()))]
    async fn bulk(&self, request: &BulkRequest) -> Result<BulkResponse, ClusterError> {
        if let Some(ref doc_type) = request.doc_type {
            debug!(doc_type = %doc_type, "OpenSearch has no mapping types, sending without type");
        }

        let body: Vec<JsonBody<Value>> = Self::bulk_lines(request)
            .into_iter()
            .map(JsonBody::from)
            .collect();

        let response = self
            .client
            .bulk(BulkParts::Index(&request.index))
            .body(body)
            .send()
            .await
            .map_err(|e| ClusterError::bulk(e.to_string()))?;

        Self::read_json(response, ClusterError::BulkError).await
    }
}
