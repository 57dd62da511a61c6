//! Dependency initialization and wiring for the reindexer.

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::reindex::Reindexer;
use crate::ReindexError;
use search_helpers_repository::{
    BulkFactory, ClusterClient, HitCursor, OpenSearchClusterClient, PageCursor, TracingNotifier,
};
use search_helpers_shared::SearchParams;

/// Container for all initialized dependencies.
pub struct Dependencies {
    pub settings: Settings,
    pub client: Arc<dyn ClusterClient>,
    pub bulk_factory: BulkFactory,
}

impl Dependencies {
    /// Connect to OpenSearch and build the bulk factory.
    pub fn new(settings: Settings) -> Result<Self, ReindexError> {
        info!(
            opensearch_url = %settings.opensearch_url,
            source_index = %settings.source_index,
            target_index = %settings.target_index,
            auto_flush_threshold = settings.bulk.auto_flush_threshold,
            scroll_ttl = %settings.scroll.ttl,
            scroll_page_size = settings.scroll.page_size,
            "Initializing dependencies"
        );

        let client = OpenSearchClusterClient::new(&settings.opensearch_url).map_err(|e| {
            ReindexError::config(format!("Failed to create OpenSearch client: {}", e))
        })?;

        Ok(Self::with_client(settings, Arc::new(client)))
    }

    /// Wire the dependencies around an existing cluster client.
    pub fn with_client(settings: Settings, client: Arc<dyn ClusterClient>) -> Self {
        let mut bulk_factory = BulkFactory::with_config(client.clone(), settings.bulk.clone());
        bulk_factory.set_notifier(Arc::new(TracingNotifier));

        Self {
            settings,
            client,
            bulk_factory,
        }
    }

    /// Build a reindexer from the source to the target index.
    pub fn reindexer(&self) -> Reindexer {
        let mut params = SearchParams::new(self.settings.source_index.clone())
            .with_scroll(self.settings.scroll.ttl.clone())
            .with_size(self.settings.scroll.page_size);
        params.body = self.settings.source_query.clone();

        let hits = HitCursor::new(PageCursor::new(self.client.clone(), params));
        let bulk = self.bulk_factory.create_bulk(
            self.settings.target_index.clone(),
            self.settings.target_type.clone(),
        );

        Reindexer::new(hits, bulk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_helpers_repository::{BulkConfig, ScrollConfig};
    use serde_json::json;

    fn settings() -> Settings {
        Settings {
            opensearch_url: "http://localhost:9200".to_string(),
            source_index: "old".to_string(),
            target_index: "new".to_string(),
            target_type: Some("doc".to_string()),
            source_query: Some(json!({"query": {"match_all": {}}})),
            bulk: BulkConfig::with_auto_flush_threshold(50),
            scroll: ScrollConfig {
                ttl: "2m".to_string(),
                page_size: 10,
            },
        }
    }

    #[tokio::test]
    async fn test_new_with_valid_url() {
        let deps = Dependencies::new(settings()).unwrap();
        assert_eq!(deps.bulk_factory.config().auto_flush_threshold, 50);
    }

    #[tokio::test]
    async fn test_new_with_invalid_url() {
        let mut bad = settings();
        bad.opensearch_url = "not a url".to_string();

        let result = Dependencies::new(bad);
        assert!(matches!(result, Err(ReindexError::ConfigError(_))));
    }

    #[tokio::test]
    async fn test_reindexer_is_configured_from_settings() {
        let deps = Dependencies::new(settings()).unwrap();
        let reindexer = deps.reindexer();

        let params = reindexer.hits().pages().params();
        assert_eq!(params.indices, vec!["old".to_string()]);
        assert_eq!(params.scroll.as_deref(), Some("2m"));
        assert_eq!(params.size, Some(10));
        assert_eq!(params.body, Some(json!({"query": {"match_all": {}}})));

        assert_eq!(reindexer.bulk().index(), "new");
        assert_eq!(reindexer.bulk().doc_type(), Some("doc"));
        assert_eq!(reindexer.bulk().auto_flush_threshold(), 50);
    }
}
