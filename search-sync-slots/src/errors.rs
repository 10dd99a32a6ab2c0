//! Error types for signal handling.

use search_sync_repository::{PersistenceError, SearchError};
use thiserror::Error;

use crate::signal::SignalKind;

/// Errors a slot can surface while handling a signal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// Reading current state failed.
    #[error("Persistence error: {0}")]
    PersistenceError(#[from] PersistenceError),

    /// Writing to the index failed.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),
}

/// A slot failed while a signal was being dispatched.
///
/// Slots registered after the failing one did not run. Index writes made
/// before the failure stay applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Slot {slot} failed on {kind} signal: {source}")]
pub struct DispatchError {
    /// Name of the failing slot.
    pub slot: &'static str,
    /// Kind of the signal being dispatched.
    pub kind: SignalKind,
    /// The slot's error.
    #[source]
    pub source: SlotError,
}
