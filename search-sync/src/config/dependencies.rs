//! Dependency initialization and wiring for search sync.

use std::sync::Arc;
use tracing::info;

use super::SyncConfig;
use crate::reindexer::BulkReindexer;
use crate::IndexingError;
use search_sync_repository::{
    InMemorySearchIndex, OpenSearchHandler, PersistenceHandler, SearchHandler,
};
use search_sync_slots::SlotDispatcher;

/// Container for all initialized dependencies.
pub struct Dependencies {
    pub config: SyncConfig,
    pub persistence: Arc<dyn PersistenceHandler>,
    pub search: Arc<dyn SearchHandler>,
    /// Dispatcher with the standard index-sync slots registered.
    pub dispatcher: SlotDispatcher,
    pub reindexer: BulkReindexer,
}

impl Dependencies {
    /// Initialize dependencies against the configured OpenSearch cluster.
    ///
    /// The cluster must be reachable and healthy; indices with fixed names
    /// are created if missing.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If initialization fails
    pub async fn new(
        config: SyncConfig,
        persistence: Arc<dyn PersistenceHandler>,
    ) -> Result<Self, IndexingError> {
        info!(
            opensearch_url = %config.opensearch_url,
            index_prefix = %config.index_prefix,
            cores_setup = %config.cores_setup,
            "Initializing dependencies"
        );

        let handler = OpenSearchHandler::new(&config.opensearch_url, config.index_config())
            .await
            .map_err(|e| IndexingError::config(format!("Failed to create OpenSearch handler: {}", e)))?;

        let healthy = handler
            .health_check()
            .await
            .map_err(|e| IndexingError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        handler.ensure_indices().await?;

        Self::assemble(config, persistence, Arc::new(handler))
    }

    /// Initialize dependencies writing to an in-memory index.
    pub fn in_memory(
        config: SyncConfig,
        persistence: Arc<dyn PersistenceHandler>,
        index: Arc<InMemorySearchIndex>,
    ) -> Result<Self, IndexingError> {
        info!(cores_setup = %config.cores_setup, "Initializing in-memory dependencies");
        Self::assemble(config, persistence, index)
    }

    fn assemble(
        config: SyncConfig,
        persistence: Arc<dyn PersistenceHandler>,
        search: Arc<dyn SearchHandler>,
    ) -> Result<Self, IndexingError> {
        let dispatcher = SlotDispatcher::with_index_sync_slots(persistence.clone(), search.clone());
        let reindexer =
            BulkReindexer::with_config(persistence.clone(), search.clone(), config.reindex_config())?;

        Ok(Self {
            config,
            persistence,
            search,
            dispatcher,
            reindexer,
        })
    }
}
