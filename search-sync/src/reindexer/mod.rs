//! Bulk reindexer.
//!
//! Rebuilds the search index from the content repository, independent of
//! signals. Used for initial setup, recovery and loading test fixtures.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, instrument};

use crate::IndexingError;
use search_sync_repository::{PersistenceHandler, SearchHandler};
use search_sync_shared::{Content, ContentId, VersionNo};

/// Configuration for the bulk reindexer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReindexConfig {
    /// Number of contents loaded and submitted per bulk call.
    ///
    /// `None` loads everything first and submits it in a single call.
    pub batch_size: Option<usize>,
}

/// Outcome of a reindex run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReindexSummary {
    /// `(id, version)` pairs returned by the scan.
    pub scanned: usize,
    /// Contents submitted to the index.
    pub indexed: usize,
    /// Bulk calls made.
    pub batches: usize,
}

/// Rebuilds the whole index from persistence.
///
/// Purge and bulk submission are not atomic: readers can observe an empty
/// or partially filled index while a run is in progress.
pub struct BulkReindexer {
    persistence: Arc<dyn PersistenceHandler>,
    search: Arc<dyn SearchHandler>,
    config: ReindexConfig,
}

impl BulkReindexer {
    /// Create a reindexer submitting everything in one bulk call.
    pub fn new(persistence: Arc<dyn PersistenceHandler>, search: Arc<dyn SearchHandler>) -> Self {
        Self {
            persistence,
            search,
            config: ReindexConfig::default(),
        }
    }

    /// Create a reindexer with custom configuration.
    ///
    /// A batch size of zero is rejected.
    pub fn with_config(
        persistence: Arc<dyn PersistenceHandler>,
        search: Arc<dyn SearchHandler>,
        config: ReindexConfig,
    ) -> Result<Self, IndexingError> {
        if config.batch_size == Some(0) {
            return Err(IndexingError::config("Reindex batch size must be at least 1"));
        }

        Ok(Self {
            persistence,
            search,
            config,
        })
    }

    pub fn config(&self) -> ReindexConfig {
        self.config
    }

    /// Purge the index and fill it with the current version of every content.
    ///
    /// In single-submit mode every content is loaded before the purge, so a
    /// load failure leaves the index untouched. In batched mode the purge
    /// happens first and a failure leaves a partially rebuilt index; run it
    /// again to recover.
    #[instrument(skip(self), fields(batch_size = ?self.config.batch_size))]
    pub async fn reindex_all(&self) -> Result<ReindexSummary, IndexingError> {
        let versions = self.persistence.content_versions().await.map_err(|e| {
            error!(error = %e, "Content scan failed");
            e
        })?;

        let started_at = Utc::now();
        info!(count = versions.len(), "Starting bulk reindex");

        let summary = match self.config.batch_size {
            None => self.reindex_at_once(&versions).await?,
            Some(batch_size) => self.reindex_in_batches(&versions, batch_size).await?,
        };

        info!(
            scanned = summary.scanned,
            indexed = summary.indexed,
            batches = summary.batches,
            duration_ms = (Utc::now() - started_at).num_milliseconds(),
            "Bulk reindex completed"
        );
        Ok(summary)
    }

    async fn reindex_at_once(
        &self,
        versions: &[(ContentId, VersionNo)],
    ) -> Result<ReindexSummary, IndexingError> {
        let contents = self.load_all(versions).await?;

        self.purge().await?;
        self.search.set_commit(true);
        self.submit(&contents).await?;

        Ok(ReindexSummary {
            scanned: versions.len(),
            indexed: contents.len(),
            batches: 1,
        })
    }

    async fn reindex_in_batches(
        &self,
        versions: &[(ContentId, VersionNo)],
        batch_size: usize,
    ) -> Result<ReindexSummary, IndexingError> {
        self.purge().await?;
        self.search.set_commit(true);

        let mut summary = ReindexSummary {
            scanned: versions.len(),
            ..ReindexSummary::default()
        };

        for batch in versions.chunks(batch_size) {
            let contents = self.load_all(batch).await?;
            self.submit(&contents).await?;

            summary.indexed += contents.len();
            summary.batches += 1;
            debug!(
                batch = summary.batches,
                indexed = summary.indexed,
                total = summary.scanned,
                "Batch submitted"
            );
        }

        Ok(summary)
    }

    async fn load_all(
        &self,
        versions: &[(ContentId, VersionNo)],
    ) -> Result<Vec<Content>, IndexingError> {
        let mut contents = Vec::with_capacity(versions.len());
        for &(content_id, version_no) in versions {
            let content = self
                .persistence
                .load_content(content_id, version_no)
                .await
                .map_err(|e| {
                    error!(
                        content_id = %content_id,
                        version_no = %version_no,
                        error = %e,
                        "Failed to load content for reindex"
                    );
                    e
                })?;
            contents.push(content);
        }
        Ok(contents)
    }

    async fn purge(&self) -> Result<(), IndexingError> {
        self.search.purge_index().await.map_err(|e| {
            error!(error = %e, "Failed to purge index");
            e
        })?;
        debug!("Index purged");
        Ok(())
    }

    async fn submit(&self, contents: &[Content]) -> Result<(), IndexingError> {
        self.search.bulk_index_content(contents).await.map_err(|e| {
            error!(count = contents.len(), error = %e, "Bulk index failed");
            e
        })?;
        Ok(())
    }
}
