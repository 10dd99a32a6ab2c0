//! # Search Sync Slots
//!
//! This crate keeps the search index in step with the content repository by
//! reacting to domain signals.
//!
//! ## Architecture
//!
//! 1. **Signal**: an immutable record of a committed mutation
//! 2. **Slot**: a handler bound to one signal kind that re-reads current
//!    state from persistence and writes index documents
//! 3. **Dispatcher**: routes each signal to the slots registered for its
//!    kind, in registration order

pub mod dispatcher;
pub mod errors;
pub mod signal;
pub mod slot;
pub mod slots;

pub use dispatcher::{SlotDispatcher, SlotDispatcherBuilder};
pub use errors::{DispatchError, SlotError};
pub use signal::{Signal, SignalKind};
pub use slot::{Slot, SlotHandlers};
