//! Slot for [`Signal::UnhideLocation`].

use async_trait::async_trait;

use crate::errors::SlotError;
use crate::signal::{Signal, SignalKind};
use crate::slot::{Slot, SlotHandlers};

/// Reindexes the content and the location after a location was revealed.
pub struct UnhideLocationSlot {
    handlers: SlotHandlers,
}

impl UnhideLocationSlot {
    pub fn new(handlers: SlotHandlers) -> Self {
        Self { handlers }
    }
}

#[async_trait]
impl Slot for UnhideLocationSlot {
    fn name(&self) -> &'static str {
        "unhide_location"
    }

    fn kind(&self) -> SignalKind {
        SignalKind::UnhideLocation
    }

    async fn receive(&self, signal: &Signal) -> Result<(), SlotError> {
        let Signal::UnhideLocation(signal) = signal else {
            return Ok(());
        };

        self.handlers
            .index_content_version(signal.content_id, signal.current_version_no)
            .await?;
        self.handlers.index_location(signal.location_id).await
    }
}
