//! In-memory handler implementations.
//!
//! Used to seed a repository from a JSON fixture, for dry runs of the sync
//! binary, and as test doubles.

mod persistence;
mod search_index;

pub use persistence::InMemoryPersistence;
pub use search_index::{InMemorySearchIndex, IndexOperation};

use serde::{Deserialize, Serialize};

use search_sync_shared::{Content, Location};

/// A snapshot of repository records, as stored in fixture files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    /// Every stored content version. The `info` of the last entry per
    /// content id wins.
    #[serde(default)]
    pub contents: Vec<Content>,
    /// Every location of the tree.
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl Fixture {
    /// Parse a fixture from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
