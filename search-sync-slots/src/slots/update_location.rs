//! Slot for [`Signal::UpdateLocation`].

use async_trait::async_trait;

use crate::errors::SlotError;
use crate::signal::{Signal, SignalKind};
use crate::slot::{Slot, SlotHandlers};

/// Reindexes an updated location.
pub struct UpdateLocationSlot {
    handlers: SlotHandlers,
}

impl UpdateLocationSlot {
    pub fn new(handlers: SlotHandlers) -> Self {
        Self { handlers }
    }
}

#[async_trait]
impl Slot for UpdateLocationSlot {
    fn name(&self) -> &'static str {
        "update_location"
    }

    fn kind(&self) -> SignalKind {
        SignalKind::UpdateLocation
    }

    async fn receive(&self, signal: &Signal) -> Result<(), SlotError> {
        match signal {
            Signal::UpdateLocation(signal) => self.handlers.index_location(signal.location_id).await,
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::UpdateLocationSignal;
    use crate::slots::test_support::{location, SlotFixture};
    use search_sync_shared::{ContentId, LocationId};

    #[tokio::test]
    async fn test_reindexes_location_priority() {
        let fixture = SlotFixture::new();
        let mut updated = location(20, 2, "/1/20/");
        updated.priority = 5;
        fixture.persistence.insert_location(updated);
        let slot = UpdateLocationSlot::new(fixture.handlers());

        let signal = Signal::UpdateLocation(UpdateLocationSignal {
            content_id: ContentId(2),
            location_id: LocationId(20),
        });
        slot.receive(&signal).await.unwrap();

        let doc = fixture.index.location_document(LocationId(20)).unwrap();
        assert_eq!(doc.priority, 5);
        assert_eq!(fixture.index.content_count(), 0);
    }
}
