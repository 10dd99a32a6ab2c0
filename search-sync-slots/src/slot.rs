//! The slot contract and the handler bundle slots share.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::SlotError;
use crate::signal::{Signal, SignalKind};
use search_sync_repository::{PersistenceHandler, SearchHandler};
use search_sync_shared::{ContentId, LocationId, VersionNo};

/// A handler reacting to one kind of signal with index writes.
///
/// Slots are stateless apart from the shared handlers injected at
/// construction. `receive` must return `Ok(())` without touching either
/// handler for any signal whose kind is not [`Slot::kind`], so that slots can
/// share a single dispatch channel.
#[async_trait]
pub trait Slot: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    /// The signal kind this slot reacts to.
    fn kind(&self) -> SignalKind;

    /// React to a signal.
    ///
    /// Current state is re-read from persistence rather than taken from the
    /// signal. Errors are returned as-is; index writes that already succeeded
    /// are not rolled back.
    async fn receive(&self, signal: &Signal) -> Result<(), SlotError>;
}

/// Persistence and search handlers shared by all slots.
#[derive(Clone)]
pub struct SlotHandlers {
    persistence: Arc<dyn PersistenceHandler>,
    search: Arc<dyn SearchHandler>,
}

impl SlotHandlers {
    /// Bundle the handlers a slot works with.
    pub fn new(persistence: Arc<dyn PersistenceHandler>, search: Arc<dyn SearchHandler>) -> Self {
        Self {
            persistence,
            search,
        }
    }

    pub fn persistence(&self) -> &dyn PersistenceHandler {
        self.persistence.as_ref()
    }

    pub fn search(&self) -> &dyn SearchHandler {
        self.search.as_ref()
    }

    /// Load a content object at the given version and index it.
    pub async fn index_content_version(
        &self,
        content_id: ContentId,
        version_no: VersionNo,
    ) -> Result<(), SlotError> {
        let content = self
            .persistence
            .load_content(content_id, version_no)
            .await?;
        self.search.index_content(&content).await?;

        debug!(content_id = %content_id, version_no = %version_no, "Content reindexed");
        Ok(())
    }

    /// Look up the current version of a content object and index it.
    pub async fn index_current_content(&self, content_id: ContentId) -> Result<(), SlotError> {
        let info = self.persistence.load_content_info(content_id).await?;
        self.index_content_version(content_id, info.current_version_no)
            .await
    }

    /// Load a location and index it.
    pub async fn index_location(&self, location_id: LocationId) -> Result<(), SlotError> {
        let location = self.persistence.load_location(location_id).await?;
        self.search.index_location(&location).await?;

        debug!(location_id = %location_id, "Location reindexed");
        Ok(())
    }
}
