//! # Search Sync
//!
//! Main library for keeping the content search index in step with the
//! content repository.
//!
//! This crate provides the bulk reindexer, the environment configuration
//! (including the cores setup selector) and the wiring that turns a
//! configuration into ready-to-use handlers, dispatcher and reindexer.

pub mod config;
pub mod reindexer;

pub use config::{CoresSetup, Dependencies, SyncConfig};
pub use reindexer::{BulkReindexer, ReindexConfig, ReindexSummary};

use thiserror::Error;

/// Errors that can occur during sync initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Persistence error.
    #[error("Persistence error: {0}")]
    PersistenceError(#[from] search_sync_repository::PersistenceError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] search_sync_repository::SearchError),

    /// Dispatch error.
    #[error("Dispatch error: {0}")]
    DispatchError(#[from] search_sync_slots::DispatchError),

    /// Fixture or signal file could not be parsed.
    #[error("Fixture error: {0}")]
    FixtureError(String),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a fixture error.
    pub fn fixture(msg: impl Into<String>) -> Self {
        Self::FixtureError(msg.into())
    }
}
