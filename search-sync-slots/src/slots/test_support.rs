//! Shared fixtures for slot and dispatcher tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::signal::*;
use crate::slot::SlotHandlers;
use search_sync_repository::{InMemoryPersistence, InMemorySearchIndex, SearchError, SearchHandler};
use search_sync_shared::{
    Content, ContentId, ContentInfo, Field, Location, LocationId, VersionNo,
};

/// In-memory repository and index wired into `SlotHandlers`.
pub struct SlotFixture {
    pub persistence: Arc<InMemoryPersistence>,
    pub index: Arc<InMemorySearchIndex>,
}

impl SlotFixture {
    pub fn new() -> Self {
        Self {
            persistence: Arc::new(InMemoryPersistence::new()),
            index: Arc::new(InMemorySearchIndex::new()),
        }
    }

    pub fn handlers(&self) -> SlotHandlers {
        SlotHandlers::new(self.persistence.clone(), self.index.clone())
    }

    pub fn with_search(&self, search: Arc<dyn SearchHandler>) -> SlotHandlers {
        SlotHandlers::new(self.persistence.clone(), search)
    }

    /// Store `version` of a content whose current version is `current`.
    pub fn add_content(&self, id: u64, version: u64, current: u64) {
        self.persistence.insert_content(content(id, version, current));
    }

    pub fn add_location(&self, id: u64, content_id: u64, path: &str) {
        self.persistence.insert_location(location(id, content_id, path));
    }
}

pub fn content(id: u64, version: u64, current: u64) -> Content {
    Content {
        info: ContentInfo {
            id: ContentId(id),
            current_version_no: VersionNo(current),
            name: format!("Content {}", id),
            content_type_id: 1,
            section_id: 1,
            main_language_code: "eng-GB".to_string(),
            main_location_id: None,
            published: true,
            modified: Utc::now(),
        },
        version_no: VersionNo(version),
        language_codes: vec!["eng-GB".to_string()],
        fields: vec![Field::new(
            "title",
            "eng-GB",
            format!("Content {} v{}", id, version),
        )],
    }
}

pub fn location(id: u64, content_id: u64, path: &str) -> Location {
    let depth = path.split('/').filter(|s| !s.is_empty()).count() as u32 - 1;
    Location {
        id: LocationId(id),
        content_id: ContentId(content_id),
        parent_id: None,
        path_string: path.to_string(),
        depth,
        priority: 0,
        hidden: false,
        invisible: false,
    }
}

/// One signal of every kind.
pub fn all_signals() -> Vec<Signal> {
    vec![
        Signal::PublishVersion(PublishVersionSignal {
            content_id: ContentId(1),
            version_no: VersionNo(1),
        }),
        Signal::DeleteContent(DeleteContentSignal {
            content_id: ContentId(1),
            affected_location_ids: vec![LocationId(2)],
        }),
        Signal::CreateLocation(CreateLocationSignal {
            content_id: ContentId(1),
            location_id: LocationId(2),
        }),
        Signal::UpdateLocation(UpdateLocationSignal {
            content_id: ContentId(1),
            location_id: LocationId(2),
        }),
        Signal::DeleteLocation(DeleteLocationSignal {
            content_id: ContentId(1),
            location_id: LocationId(2),
        }),
        Signal::HideLocation(HideLocationSignal {
            content_id: ContentId(1),
            current_version_no: VersionNo(1),
            location_id: LocationId(2),
        }),
        Signal::UnhideLocation(UnhideLocationSignal {
            content_id: ContentId(1),
            current_version_no: VersionNo(1),
            location_id: LocationId(2),
        }),
        Signal::SwapLocation(SwapLocationSignal {
            content1_id: ContentId(1),
            location1_id: LocationId(2),
            content2_id: ContentId(3),
            location2_id: LocationId(4),
        }),
        Signal::MoveSubtree(MoveSubtreeSignal {
            subtree_id: LocationId(2),
            new_parent_location_id: LocationId(1),
        }),
    ]
}

/// Search handler rejecting every write.
pub struct RejectingSearch;

#[async_trait]
impl SearchHandler for RejectingSearch {
    async fn index_content(&self, _content: &Content) -> Result<(), SearchError> {
        Err(SearchError::index("rejected"))
    }

    async fn index_location(&self, _location: &Location) -> Result<(), SearchError> {
        Err(SearchError::index("rejected"))
    }

    async fn delete_content(
        &self,
        _content_id: ContentId,
        _version_no: Option<VersionNo>,
    ) -> Result<(), SearchError> {
        Err(SearchError::delete("rejected"))
    }

    async fn delete_location(
        &self,
        _location_id: LocationId,
        _content_id: ContentId,
    ) -> Result<(), SearchError> {
        Err(SearchError::delete("rejected"))
    }

    async fn purge_index(&self) -> Result<(), SearchError> {
        Err(SearchError::purge("rejected"))
    }

    fn set_commit(&self, _commit: bool) {}

    async fn commit(&self) -> Result<(), SearchError> {
        Err(SearchError::commit("rejected"))
    }

    async fn bulk_index_content(&self, _contents: &[Content]) -> Result<(), SearchError> {
        Err(SearchError::bulk_index("rejected"))
    }
}
