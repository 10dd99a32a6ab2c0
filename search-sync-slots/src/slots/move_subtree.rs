//! Slot for [`Signal::MoveSubtree`].

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::SlotError;
use crate::signal::{Signal, SignalKind};
use crate::slot::{Slot, SlotHandlers};

/// Reindexes every location of a moved subtree and the content they hold.
///
/// Paths change for the whole subtree, so each location document and each
/// content document below the moved root is rebuilt. A content object placed
/// at several locations of the subtree is indexed once.
pub struct MoveSubtreeSlot {
    handlers: SlotHandlers,
}

impl MoveSubtreeSlot {
    pub fn new(handlers: SlotHandlers) -> Self {
        Self { handlers }
    }
}

#[async_trait]
impl Slot for MoveSubtreeSlot {
    fn name(&self) -> &'static str {
        "move_subtree"
    }

    fn kind(&self) -> SignalKind {
        SignalKind::MoveSubtree
    }

    async fn receive(&self, signal: &Signal) -> Result<(), SlotError> {
        let Signal::MoveSubtree(signal) = signal else {
            return Ok(());
        };

        let subtree = self
            .handlers
            .persistence()
            .load_subtree(signal.subtree_id)
            .await?;

        debug!(
            subtree_id = %signal.subtree_id,
            new_parent = %signal.new_parent_location_id,
            size = subtree.len(),
            "Reindexing moved subtree"
        );

        let mut indexed_content = HashSet::new();
        for location in &subtree {
            if indexed_content.insert(location.content_id) {
                self.handlers
                    .index_current_content(location.content_id)
                    .await?;
            }
            self.handlers.search().index_location(location).await?;
        }
        Ok(())
    }
}
