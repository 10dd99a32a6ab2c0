//! Index-sync slots, one per signal kind.

mod create_location;
mod delete_content;
mod delete_location;
mod hide_location;
mod move_subtree;
mod publish_version;
mod swap_location;
mod unhide_location;
mod update_location;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

pub use create_location::CreateLocationSlot;
pub use delete_content::DeleteContentSlot;
pub use delete_location::DeleteLocationSlot;
pub use hide_location::HideLocationSlot;
pub use move_subtree::MoveSubtreeSlot;
pub use publish_version::PublishVersionSlot;
pub use swap_location::SwapLocationSlot;
pub use unhide_location::UnhideLocationSlot;
pub use update_location::UpdateLocationSlot;

use crate::signal::SignalKind;
use crate::slot::{Slot, SlotHandlers};

/// One slot for every signal kind, in `SignalKind::ALL` order.
pub fn index_sync_slots(handlers: SlotHandlers) -> Vec<Arc<dyn Slot>> {
    let mut slots: Vec<Arc<dyn Slot>> = Vec::with_capacity(SignalKind::ALL.len());
    slots.push(Arc::new(PublishVersionSlot::new(handlers.clone())));
    slots.push(Arc::new(DeleteContentSlot::new(handlers.clone())));
    slots.push(Arc::new(CreateLocationSlot::new(handlers.clone())));
    slots.push(Arc::new(UpdateLocationSlot::new(handlers.clone())));
    slots.push(Arc::new(DeleteLocationSlot::new(handlers.clone())));
    slots.push(Arc::new(HideLocationSlot::new(handlers.clone())));
    slots.push(Arc::new(UnhideLocationSlot::new(handlers.clone())));
    slots.push(Arc::new(SwapLocationSlot::new(handlers.clone())));
    slots.push(Arc::new(MoveSubtreeSlot::new(handlers)));
    slots
}
