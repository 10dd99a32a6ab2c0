//! Slot for [`Signal::SwapLocation`].

use async_trait::async_trait;

use crate::errors::SlotError;
use crate::signal::{Signal, SignalKind};
use crate::slot::{Slot, SlotHandlers};

/// Reindexes both sides of a location swap.
pub struct SwapLocationSlot {
    handlers: SlotHandlers,
}

impl SwapLocationSlot {
    pub fn new(handlers: SlotHandlers) -> Self {
        Self { handlers }
    }
}

#[async_trait]
impl Slot for SwapLocationSlot {
    fn name(&self) -> &'static str {
        "swap_location"
    }

    fn kind(&self) -> SignalKind {
        SignalKind::SwapLocation
    }

    async fn receive(&self, signal: &Signal) -> Result<(), SlotError> {
        let Signal::SwapLocation(signal) = signal else {
            return Ok(());
        };

        let sides = [
            (signal.content1_id, signal.location1_id),
            (signal.content2_id, signal.location2_id),
        ];
        for (content_id, location_id) in sides {
            self.handlers.index_current_content(content_id).await?;
            self.handlers.index_location(location_id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SwapLocationSignal;
    use crate::slots::test_support::SlotFixture;
    use search_sync_repository::IndexOperation;
    use search_sync_shared::{ContentId, LocationId, VersionNo};

    #[tokio::test]
    async fn test_reindexes_both_sides() {
        let fixture = SlotFixture::new();
        fixture.add_content(1, 1, 1);
        fixture.add_content(2, 3, 3);
        // Already swapped in persistence.
        fixture.add_location(10, 2, "/1/10/");
        fixture.add_location(20, 1, "/1/20/");
        let slot = SwapLocationSlot::new(fixture.handlers());

        let signal = Signal::SwapLocation(SwapLocationSignal {
            content1_id: ContentId(1),
            location1_id: LocationId(10),
            content2_id: ContentId(2),
            location2_id: LocationId(20),
        });
        slot.receive(&signal).await.unwrap();

        assert_eq!(
            fixture.index.operations(),
            vec![
                IndexOperation::IndexContent {
                    content_id: ContentId(1),
                    version_no: VersionNo(1),
                },
                IndexOperation::IndexLocation(LocationId(10)),
                IndexOperation::IndexContent {
                    content_id: ContentId(2),
                    version_no: VersionNo(3),
                },
                IndexOperation::IndexLocation(LocationId(20)),
            ]
        );
        let doc = fixture.index.location_document(LocationId(10)).unwrap();
        assert_eq!(doc.content_id, ContentId(2));
    }
}
