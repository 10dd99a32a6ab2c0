//! Signal dispatcher.
//!
//! Routes each signal to the slots registered for its kind. The routing
//! table is built once at startup and never changes afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, instrument, warn};

use crate::errors::DispatchError;
use crate::signal::{Signal, SignalKind};
use crate::slot::{Slot, SlotHandlers};
use crate::slots::index_sync_slots;
use search_sync_repository::{PersistenceHandler, SearchHandler};

/// Collects slot registrations before the dispatcher is built.
#[derive(Default)]
pub struct SlotDispatcherBuilder {
    routes: HashMap<SignalKind, Vec<Arc<dyn Slot>>>,
}

impl SlotDispatcherBuilder {
    /// Register a slot under its own kind, after any slots already there.
    pub fn register(mut self, slot: Arc<dyn Slot>) -> Self {
        self.routes.entry(slot.kind()).or_default().push(slot);
        self
    }

    /// Register several slots in order.
    pub fn register_all(self, slots: impl IntoIterator<Item = Arc<dyn Slot>>) -> Self {
        slots.into_iter().fold(self, Self::register)
    }

    /// Freeze the routing table.
    pub fn build(self) -> SlotDispatcher {
        let dispatcher = SlotDispatcher {
            routes: self.routes,
        };

        let unrouted = dispatcher.unrouted_kinds();
        if !unrouted.is_empty() {
            warn!(kinds = ?unrouted, "Signal kinds without any slot");
        }
        dispatcher
    }
}

/// Delivers signals to their slots, in-line and in registration order.
///
/// Dispatch stops at the first failing slot and returns its error; slots
/// registered after it do not see the signal. Index writes already made by
/// earlier slots, or by the failing slot itself, stay applied.
pub struct SlotDispatcher {
    routes: HashMap<SignalKind, Vec<Arc<dyn Slot>>>,
}

impl SlotDispatcher {
    /// Start building a dispatcher.
    pub fn builder() -> SlotDispatcherBuilder {
        SlotDispatcherBuilder::default()
    }

    /// Dispatcher with the standard index-sync slot for every signal kind.
    pub fn with_index_sync_slots(
        persistence: Arc<dyn PersistenceHandler>,
        search: Arc<dyn SearchHandler>,
    ) -> Self {
        let handlers = SlotHandlers::new(persistence, search);
        Self::builder()
            .register_all(index_sync_slots(handlers))
            .build()
    }

    /// Slots registered for a kind, in registration order.
    pub fn slots_for(&self, kind: SignalKind) -> &[Arc<dyn Slot>] {
        self.routes.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Kinds no slot is registered for.
    pub fn unrouted_kinds(&self) -> Vec<SignalKind> {
        SignalKind::ALL
            .into_iter()
            .filter(|kind| self.slots_for(*kind).is_empty())
            .collect()
    }

    /// Deliver a signal to every slot registered for its kind.
    #[instrument(skip(self, signal), fields(kind = %signal.kind()))]
    pub async fn dispatch(&self, signal: &Signal) -> Result<(), DispatchError> {
        let kind = signal.kind();
        let slots = self.slots_for(kind);

        debug!(slot_count = slots.len(), "Dispatching signal");

        for slot in slots {
            if let Err(source) = slot.receive(signal).await {
                error!(slot = slot.name(), error = %source, "Slot failed");
                return Err(DispatchError {
                    slot: slot.name(),
                    kind,
                    source,
                });
            }
        }
        Ok(())
    }

    /// Deliver signals one after another, stopping at the first failure.
    pub async fn dispatch_all(&self, signals: &[Signal]) -> Result<usize, DispatchError> {
        for signal in signals {
            self.dispatch(signal).await?;
        }
        Ok(signals.len())
    }
}
