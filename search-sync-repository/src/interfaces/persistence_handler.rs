//! Persistence handler trait definition.

use async_trait::async_trait;

use crate::errors::PersistenceError;
use search_sync_shared::{Content, ContentId, ContentInfo, Location, LocationId, VersionNo};

/// Read access to the authoritative content repository.
///
/// The sync core only ever reads through this trait. Implementations must be
/// `Send + Sync` since a single handler is shared by every slot and by the
/// bulk reindexer for the lifetime of the process.
#[async_trait]
pub trait PersistenceHandler: Send + Sync {
    /// Load a content object at a specific version.
    ///
    /// # Returns
    ///
    /// * `Ok(Content)` - The content with the fields of that version
    /// * `Err(PersistenceError::ContentNotFound)` - If the content does not exist
    /// * `Err(PersistenceError::VersionNotFound)` - If the version does not exist
    async fn load_content(
        &self,
        content_id: ContentId,
        version_no: VersionNo,
    ) -> Result<Content, PersistenceError>;

    /// Load version-independent metadata, including the current version number.
    async fn load_content_info(&self, content_id: ContentId) -> Result<ContentInfo, PersistenceError>;

    /// Load a single location.
    async fn load_location(&self, location_id: LocationId) -> Result<Location, PersistenceError>;

    /// Load every location the content is placed at. May be empty.
    async fn load_locations_by_content(
        &self,
        content_id: ContentId,
    ) -> Result<Vec<Location>, PersistenceError>;

    /// Load the subtree rooted at `root`, the root included, in path order.
    async fn load_subtree(&self, root: LocationId) -> Result<Vec<Location>, PersistenceError>;

    /// Scan all content objects, returning `(id, current version)` pairs.
    ///
    /// The order is whatever the backing store returns.
    async fn content_versions(&self) -> Result<Vec<(ContentId, VersionNo)>, PersistenceError>;
}
