//! OpenSearch implementation of the search handler.
//!
//! This module provides a concrete implementation of `SearchHandler`
//! using OpenSearch as the backend.

mod client;
mod index_config;

pub use client::OpenSearchHandler;
pub use index_config::{get_index_settings, IndexConfig, IndexLayout};
