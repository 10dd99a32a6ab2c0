//! Slot for [`Signal::PublishVersion`].

use async_trait::async_trait;
use tracing::debug;

use crate::errors::SlotError;
use crate::signal::{Signal, SignalKind};
use crate::slot::{Slot, SlotHandlers};

/// Indexes a freshly published version and every location of its content.
pub struct PublishVersionSlot {
    handlers: SlotHandlers,
}

impl PublishVersionSlot {
    pub fn new(handlers: SlotHandlers) -> Self {
        Self { handlers }
    }
}

#[async_trait]
impl Slot for PublishVersionSlot {
    fn name(&self) -> &'static str {
        "publish_version"
    }

    fn kind(&self) -> SignalKind {
        SignalKind::PublishVersion
    }

    async fn receive(&self, signal: &Signal) -> Result<(), SlotError> {
        let Signal::PublishVersion(signal) = signal else {
            return Ok(());
        };

        self.handlers
            .index_content_version(signal.content_id, signal.version_no)
            .await?;

        let locations = self
            .handlers
            .persistence()
            .load_locations_by_content(signal.content_id)
            .await?;

        debug!(
            content_id = %signal.content_id,
            location_count = locations.len(),
            "Reindexing locations of published content"
        );

        for location in &locations {
            self.handlers.search().index_location(location).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::PublishVersionSignal;
    use crate::slots::test_support::SlotFixture;
    use search_sync_repository::{IndexOperation, PersistenceError};
    use search_sync_shared::{ContentId, LocationId, VersionNo};

    fn publish(content_id: u64, version: u64) -> Signal {
        Signal::PublishVersion(PublishVersionSignal {
            content_id: ContentId(content_id),
            version_no: VersionNo(version),
        })
    }

    #[tokio::test]
    async fn test_indexes_content_and_all_locations() {
        let fixture = SlotFixture::new();
        fixture.add_content(4, 1, 1);
        fixture.add_content(4, 2, 2);
        fixture.add_location(40, 4, "/1/40/");
        fixture.add_location(41, 4, "/1/2/41/");
        fixture.add_location(50, 5, "/1/50/");
        let slot = PublishVersionSlot::new(fixture.handlers());

        slot.receive(&publish(4, 2)).await.unwrap();

        assert_eq!(
            fixture.index.operations(),
            vec![
                IndexOperation::IndexContent {
                    content_id: ContentId(4),
                    version_no: VersionNo(2),
                },
                IndexOperation::IndexLocation(LocationId(40)),
                IndexOperation::IndexLocation(LocationId(41)),
            ]
        );
    }

    #[tokio::test]
    async fn test_content_without_locations() {
        let fixture = SlotFixture::new();
        fixture.add_content(4, 1, 1);
        let slot = PublishVersionSlot::new(fixture.handlers());

        slot.receive(&publish(4, 1)).await.unwrap();

        assert_eq!(fixture.index.operations().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_version_fails_before_any_write() {
        let fixture = SlotFixture::new();
        fixture.add_content(4, 1, 1);
        let slot = PublishVersionSlot::new(fixture.handlers());

        let err = slot.receive(&publish(4, 7)).await.unwrap_err();

        assert_eq!(
            err,
            SlotError::PersistenceError(PersistenceError::version_not_found(
                ContentId(4),
                VersionNo(7)
            ))
        );
        assert!(fixture.index.operations().is_empty());
    }
}
