//! Interface definitions for the handlers the sync core depends on.
//!
//! Both traits are injected as `Arc<dyn ...>` at construction time so that
//! backends can be swapped and mocked in tests.

mod persistence_handler;
mod search_handler;

pub use persistence_handler::PersistenceHandler;
pub use search_handler::SearchHandler;
