//! In-memory search handler.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::errors::SearchError;
use crate::interfaces::SearchHandler;
use search_sync_shared::{
    Content, ContentDocument, ContentId, Location, LocationDocument, LocationId, VersionNo,
};

/// A write received by [`InMemorySearchIndex`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOperation {
    IndexContent {
        content_id: ContentId,
        version_no: VersionNo,
    },
    IndexLocation(LocationId),
    DeleteContent {
        content_id: ContentId,
        version_no: Option<VersionNo>,
    },
    DeleteLocation {
        location_id: LocationId,
        content_id: ContentId,
    },
    Purge,
    SetCommit(bool),
    Commit,
    /// Ids of the contents in the bulk call, in submission order.
    BulkIndexContent(Vec<ContentId>),
}

#[derive(Default)]
struct IndexState {
    contents: BTreeMap<ContentId, ContentDocument>,
    locations: BTreeMap<LocationId, LocationDocument>,
    operations: Vec<IndexOperation>,
}

/// Map-backed [`SearchHandler`] that records every write.
#[derive(Default)]
pub struct InMemorySearchIndex {
    state: Mutex<IndexState>,
    commit: AtomicBool,
}

impl InMemorySearchIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes received so far.
    pub fn operations(&self) -> Vec<IndexOperation> {
        self.lock().operations.clone()
    }

    /// The indexed document for a content object.
    pub fn content_document(&self, content_id: ContentId) -> Option<ContentDocument> {
        self.lock().contents.get(&content_id).cloned()
    }

    /// The indexed document for a location.
    pub fn location_document(&self, location_id: LocationId) -> Option<LocationDocument> {
        self.lock().locations.get(&location_id).cloned()
    }

    /// Number of indexed content documents.
    pub fn content_count(&self) -> usize {
        self.lock().contents.len()
    }

    /// Number of indexed location documents.
    pub fn location_count(&self) -> usize {
        self.lock().locations.len()
    }

    /// Current commit mode.
    pub fn is_commit_enabled(&self) -> bool {
        self.commit.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, IndexState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SearchHandler for InMemorySearchIndex {
    async fn index_content(&self, content: &Content) -> Result<(), SearchError> {
        let mut state = self.lock();
        state.operations.push(IndexOperation::IndexContent {
            content_id: content.id(),
            version_no: content.version_no,
        });
        state
            .contents
            .insert(content.id(), ContentDocument::from_content(content));
        debug!(content_id = %content.id(), "Indexed content in memory");
        Ok(())
    }

    async fn index_location(&self, location: &Location) -> Result<(), SearchError> {
        let mut state = self.lock();
        state
            .operations
            .push(IndexOperation::IndexLocation(location.id));
        state
            .locations
            .insert(location.id, LocationDocument::from_location(location));
        Ok(())
    }

    async fn delete_content(
        &self,
        content_id: ContentId,
        version_no: Option<VersionNo>,
    ) -> Result<(), SearchError> {
        let mut state = self.lock();
        state.operations.push(IndexOperation::DeleteContent {
            content_id,
            version_no,
        });

        let matches = state
            .contents
            .get(&content_id)
            .is_some_and(|doc| version_no.map_or(true, |v| doc.version_no == v));
        if matches {
            state.contents.remove(&content_id);
        }
        Ok(())
    }

    async fn delete_location(
        &self,
        location_id: LocationId,
        content_id: ContentId,
    ) -> Result<(), SearchError> {
        let mut state = self.lock();
        state.operations.push(IndexOperation::DeleteLocation {
            location_id,
            content_id,
        });
        state.locations.remove(&location_id);
        Ok(())
    }

    async fn purge_index(&self) -> Result<(), SearchError> {
        let mut state = self.lock();
        state.operations.push(IndexOperation::Purge);
        state.contents.clear();
        state.locations.clear();
        Ok(())
    }

    fn set_commit(&self, commit: bool) {
        self.commit.store(commit, Ordering::SeqCst);
        self.lock().operations.push(IndexOperation::SetCommit(commit));
    }

    async fn commit(&self) -> Result<(), SearchError> {
        self.lock().operations.push(IndexOperation::Commit);
        Ok(())
    }

    async fn bulk_index_content(&self, contents: &[Content]) -> Result<(), SearchError> {
        let mut state = self.lock();
        state.operations.push(IndexOperation::BulkIndexContent(
            contents.iter().map(Content::id).collect(),
        ));
        for content in contents {
            state
                .contents
                .insert(content.id(), ContentDocument::from_content(content));
        }
        debug!(count = contents.len(), "Bulk indexed content in memory");
        Ok(())
    }
}
