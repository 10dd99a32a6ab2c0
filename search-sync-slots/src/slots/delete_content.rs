//! Slot for [`Signal::DeleteContent`].

use async_trait::async_trait;

use crate::errors::SlotError;
use crate::signal::{Signal, SignalKind};
use crate::slot::{Slot, SlotHandlers};

/// Removes a deleted content object and its locations from the index.
///
/// Nothing is loaded: the records are already gone from persistence.
pub struct DeleteContentSlot {
    handlers: SlotHandlers,
}

impl DeleteContentSlot {
    pub fn new(handlers: SlotHandlers) -> Self {
        Self { handlers }
    }
}

#[async_trait]
impl Slot for DeleteContentSlot {
    fn name(&self) -> &'static str {
        "delete_content"
    }

    fn kind(&self) -> SignalKind {
        SignalKind::DeleteContent
    }

    async fn receive(&self, signal: &Signal) -> Result<(), SlotError> {
        let Signal::DeleteContent(signal) = signal else {
            return Ok(());
        };

        let search = self.handlers.search();
        search.delete_content(signal.content_id, None).await?;
        for location_id in &signal.affected_location_ids {
            search
                .delete_location(*location_id, signal.content_id)
                .await?;
        }
        Ok(())
    }
}
