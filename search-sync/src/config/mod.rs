//! Configuration for search sync.
//!
//! Everything is read from the environment, after `.env` has been loaded by
//! the binary. The `CORES_SETUP` selector is mandatory and is resolved
//! before any handler is constructed.

mod dependencies;

pub use dependencies::Dependencies;

use std::env;
use std::fmt;
use std::str::FromStr;

use crate::reindexer::ReindexConfig;
use crate::IndexingError;
use search_sync_repository::opensearch::IndexConfig;
use search_sync_repository::IndexLayout;

/// Environment variable selecting the index topology.
pub const CORES_SETUP_VAR: &str = "CORES_SETUP";

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default prefix for index names.
const DEFAULT_INDEX_PREFIX: &str = "content";

/// Named index topology preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoresSetup {
    /// One index per main language for content, plus a location index.
    Dedicated,
    /// One content index and one location index.
    Shared,
    /// A single index holding every document.
    Single,
}

impl CoresSetup {
    /// Resolve the setup from a raw `CORES_SETUP` value.
    ///
    /// Only the exact strings `dedicated`, `shared` and `single` are
    /// accepted; a missing value is an error as well.
    pub fn from_env_value(value: Option<&str>) -> Result<Self, IndexingError> {
        match value {
            Some(value) => value.parse(),
            None => Err(IndexingError::config(format!(
                "{} is not set, expected one of: dedicated, shared, single",
                CORES_SETUP_VAR
            ))),
        }
    }

    /// Read the setup from the `CORES_SETUP` environment variable.
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_env_value(env::var(CORES_SETUP_VAR).ok().as_deref())
    }

    /// Search engine configuration file associated with the setup.
    pub fn config_file(self) -> &'static str {
        match self {
            Self::Dedicated => "tests/solr/multicore_dedicated.yml",
            Self::Shared => "tests/solr/multicore_shared.yml",
            Self::Single => "tests/solr/single_core.yml",
        }
    }

    /// OpenSearch index layout used for this setup.
    pub fn index_layout(self) -> IndexLayout {
        match self {
            Self::Dedicated => IndexLayout::Dedicated,
            Self::Shared => IndexLayout::Shared,
            Self::Single => IndexLayout::Single,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dedicated => "dedicated",
            Self::Shared => "shared",
            Self::Single => "single",
        }
    }
}

impl FromStr for CoresSetup {
    type Err = IndexingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "dedicated" => Ok(Self::Dedicated),
            "shared" => Ok(Self::Shared),
            "single" => Ok(Self::Single),
            other => Err(IndexingError::config(format!(
                "Unsupported cores setup '{}', expected one of: dedicated, shared, single",
                other
            ))),
        }
    }
}

impl fmt::Display for CoresSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved sync configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    pub opensearch_url: String,
    pub index_prefix: String,
    pub cores_setup: CoresSetup,
    /// `None` submits the whole reindex in one bulk call.
    pub reindex_batch_size: Option<usize>,
}

impl SyncConfig {
    /// Build the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `SEARCH_INDEX_PREFIX`: Prefix for index names (default: content)
    /// - `CORES_SETUP`: `dedicated`, `shared` or `single` (required)
    /// - `REINDEX_BATCH_SIZE`: Positive batch size for bulk reindexing (optional)
    pub fn from_env() -> Result<Self, IndexingError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, IndexingError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cores_setup = CoresSetup::from_env_value(lookup(CORES_SETUP_VAR).as_deref())?;

        let reindex_batch_size = match lookup("REINDEX_BATCH_SIZE") {
            None => None,
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(0) | Err(_) => {
                    return Err(IndexingError::config(format!(
                        "REINDEX_BATCH_SIZE must be a positive integer, got '{}'",
                        raw
                    )))
                }
                Ok(size) => Some(size),
            },
        };

        Ok(Self {
            opensearch_url: lookup("OPENSEARCH_URL")
                .unwrap_or_else(|| DEFAULT_OPENSEARCH_URL.to_string()),
            index_prefix: lookup("SEARCH_INDEX_PREFIX")
                .unwrap_or_else(|| DEFAULT_INDEX_PREFIX.to_string()),
            cores_setup,
            reindex_batch_size,
        })
    }

    /// Index naming for the configured prefix and setup.
    pub fn index_config(&self) -> IndexConfig {
        IndexConfig::new(self.index_prefix.clone(), self.cores_setup.index_layout())
    }

    /// Reindexer settings.
    pub fn reindex_config(&self) -> ReindexConfig {
        ReindexConfig {
            batch_size: self.reindex_batch_size,
        }
    }
}
