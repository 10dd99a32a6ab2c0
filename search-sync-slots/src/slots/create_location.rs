//! Slot for [`Signal::CreateLocation`].

use async_trait::async_trait;

use crate::errors::SlotError;
use crate::signal::{Signal, SignalKind};
use crate::slot::{Slot, SlotHandlers};

/// Indexes a new location and refreshes its content's document.
pub struct CreateLocationSlot {
    handlers: SlotHandlers,
}

impl CreateLocationSlot {
    pub fn new(handlers: SlotHandlers) -> Self {
        Self { handlers }
    }
}

#[async_trait]
impl Slot for CreateLocationSlot {
    fn name(&self) -> &'static str {
        "create_location"
    }

    fn kind(&self) -> SignalKind {
        SignalKind::CreateLocation
    }

    async fn receive(&self, signal: &Signal) -> Result<(), SlotError> {
        let Signal::CreateLocation(signal) = signal else {
            return Ok(());
        };

        self.handlers
            .index_current_content(signal.content_id)
            .await?;
        self.handlers.index_location(signal.location_id).await
    }
}
