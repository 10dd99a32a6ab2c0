//! Slot for [`Signal::DeleteLocation`].

use async_trait::async_trait;
use tracing::debug;

use crate::errors::SlotError;
use crate::signal::{Signal, SignalKind};
use crate::slot::{Slot, SlotHandlers};
use search_sync_repository::PersistenceError;

/// Removes a deleted location and refreshes the content it held.
///
/// When the content went away together with its last location there is
/// nothing left to reindex.
pub struct DeleteLocationSlot {
    handlers: SlotHandlers,
}

impl DeleteLocationSlot {
    pub fn new(handlers: SlotHandlers) -> Self {
        Self { handlers }
    }
}

#[async_trait]
impl Slot for DeleteLocationSlot {
    fn name(&self) -> &'static str {
        "delete_location"
    }

    fn kind(&self) -> SignalKind {
        SignalKind::DeleteLocation
    }

    async fn receive(&self, signal: &Signal) -> Result<(), SlotError> {
        let Signal::DeleteLocation(signal) = signal else {
            return Ok(());
        };

        self.handlers
            .search()
            .delete_location(signal.location_id, signal.content_id)
            .await?;

        match self.handlers.index_current_content(signal.content_id).await {
            Err(SlotError::PersistenceError(PersistenceError::ContentNotFound(_))) => {
                debug!(content_id = %signal.content_id, "Content gone with its location");
                Ok(())
            }
            result => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::DeleteLocationSignal;
    use crate::slots::test_support::SlotFixture;
    use search_sync_repository::IndexOperation;
    use search_sync_shared::{ContentId, LocationId, VersionNo};

    fn delete(content_id: u64, location_id: u64) -> Signal {
        Signal::DeleteLocation(DeleteLocationSignal {
            content_id: ContentId(content_id),
            location_id: LocationId(location_id),
        })
    }

    #[tokio::test]
    async fn test_removes_location_and_reindexes_content() {
        let fixture = SlotFixture::new();
        fixture.add_content(6, 1, 1);
        let slot = DeleteLocationSlot::new(fixture.handlers());

        slot.receive(&delete(6, 60)).await.unwrap();

        assert_eq!(
            fixture.index.operations(),
            vec![
                IndexOperation::DeleteLocation {
                    location_id: LocationId(60),
                    content_id: ContentId(6),
                },
                IndexOperation::IndexContent {
                    content_id: ContentId(6),
                    version_no: VersionNo(1),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_content_gone_is_not_an_error() {
        let fixture = SlotFixture::new();
        let slot = DeleteLocationSlot::new(fixture.handlers());

        slot.receive(&delete(6, 60)).await.unwrap();

        assert_eq!(fixture.index.operations().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_current_version_propagates() {
        let fixture = SlotFixture::new();
        fixture.add_content(6, 2, 2);
        fixture
            .persistence
            .remove_version(ContentId(6), VersionNo(2));
        let slot = DeleteLocationSlot::new(fixture.handlers());

        let err = slot.receive(&delete(6, 60)).await.unwrap_err();

        assert!(matches!(
            err,
            SlotError::PersistenceError(PersistenceError::VersionNotFound { .. })
        ));
    }
}
