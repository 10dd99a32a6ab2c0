//! # Search Sync Repository
//!
//! This crate provides the handler traits the sync core consumes: a
//! read-only [`PersistenceHandler`] over the authoritative content store and
//! a [`SearchHandler`] that accepts index and remove operations. It also
//! ships an OpenSearch implementation of the search side and in-memory
//! implementations of both for fixtures and tests.

pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod opensearch;

pub use errors::{PersistenceError, SearchError};
pub use interfaces::{PersistenceHandler, SearchHandler};
pub use memory::{Fixture, InMemoryPersistence, InMemorySearchIndex, IndexOperation};
pub use opensearch::{IndexLayout, OpenSearchHandler};
