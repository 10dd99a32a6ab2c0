//! Error types for the search sync repository.

mod persistence_error;
mod search_error;

pub use persistence_error::PersistenceError;
pub use search_error::SearchError;
