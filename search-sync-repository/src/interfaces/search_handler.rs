//! Search handler trait definition.
//!
//! This module defines the abstract interface for index write operations,
//! allowing for different backend implementations (OpenSearch, in-memory, etc.).

use async_trait::async_trait;

use crate::errors::SearchError;
use search_sync_shared::{Content, ContentId, Location, LocationId, VersionNo};

/// Abstract interface for search index writes.
///
/// Implementations build the index documents themselves from the records
/// passed in, so callers always hand over freshly loaded state.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All fallible methods return `Result<T, SearchError>`. Nothing is retried.
#[async_trait]
pub trait SearchHandler: Send + Sync {
    /// Index a content object, replacing any previous document for it.
    async fn index_content(&self, content: &Content) -> Result<(), SearchError>;

    /// Index a location, replacing any previous document for it.
    async fn index_location(&self, location: &Location) -> Result<(), SearchError>;

    /// Remove a content object from the index.
    ///
    /// With `version_no` set, only a document for that version is removed.
    /// Removing something that is not indexed succeeds.
    async fn delete_content(
        &self,
        content_id: ContentId,
        version_no: Option<VersionNo>,
    ) -> Result<(), SearchError>;

    /// Remove a location from the index. Removing a missing location succeeds.
    async fn delete_location(
        &self,
        location_id: LocationId,
        content_id: ContentId,
    ) -> Result<(), SearchError>;

    /// Remove every document from the index. Irreversible.
    async fn purge_index(&self) -> Result<(), SearchError>;

    /// Toggle commit mode.
    ///
    /// When `true`, every write is made visible to readers before it returns;
    /// otherwise visibility waits for [`SearchHandler::commit`] or the backend's
    /// own refresh cycle.
    fn set_commit(&self, commit: bool);

    /// Make pending writes visible.
    async fn commit(&self) -> Result<(), SearchError>;

    /// Index many content objects in a single operation.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every document was indexed
    /// * `Err(SearchError::BulkIndexError)` - If any document failed
    async fn bulk_index_content(&self, contents: &[Content]) -> Result<(), SearchError>;
}
