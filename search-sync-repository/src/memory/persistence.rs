//! In-memory persistence handler.

use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::Fixture;
use crate::errors::PersistenceError;
use crate::interfaces::PersistenceHandler;
use search_sync_shared::{Content, ContentId, ContentInfo, Location, LocationId, VersionNo};

#[derive(Default)]
struct Store {
    infos: BTreeMap<ContentId, ContentInfo>,
    versions: HashMap<(ContentId, VersionNo), Content>,
    locations: BTreeMap<LocationId, Location>,
}

/// Map-backed [`PersistenceHandler`].
///
/// `content_versions` returns content ids in ascending order.
#[derive(Default)]
pub struct InMemoryPersistence {
    store: RwLock<Store>,
}

impl InMemoryPersistence {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded from a fixture.
    pub fn from_fixture(fixture: Fixture) -> Self {
        let persistence = Self::new();
        for content in fixture.contents {
            persistence.insert_content(content);
        }
        for location in fixture.locations {
            persistence.insert_location(location);
        }
        persistence
    }

    /// Store a content version and its metadata.
    pub fn insert_content(&self, content: Content) {
        let mut store = self.write();
        store.infos.insert(content.info.id, content.info.clone());
        store
            .versions
            .insert((content.info.id, content.version_no), content);
    }

    /// Store a location.
    pub fn insert_location(&self, location: Location) {
        self.write().locations.insert(location.id, location);
    }

    /// Drop a single stored version, keeping the content's metadata.
    pub fn remove_version(&self, content_id: ContentId, version_no: VersionNo) {
        self.write().versions.remove(&(content_id, version_no));
    }

    /// Number of content objects.
    pub fn content_count(&self) -> usize {
        self.read().infos.len()
    }

    fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.store.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PersistenceHandler for InMemoryPersistence {
    async fn load_content(
        &self,
        content_id: ContentId,
        version_no: VersionNo,
    ) -> Result<Content, PersistenceError> {
        let store = self.read();
        let info = store
            .infos
            .get(&content_id)
            .ok_or(PersistenceError::ContentNotFound(content_id))?;

        let mut content = store
            .versions
            .get(&(content_id, version_no))
            .cloned()
            .ok_or_else(|| PersistenceError::version_not_found(content_id, version_no))?;

        // Metadata is version independent; serve the latest.
        content.info = info.clone();
        Ok(content)
    }

    async fn load_content_info(&self, content_id: ContentId) -> Result<ContentInfo, PersistenceError> {
        self.read()
            .infos
            .get(&content_id)
            .cloned()
            .ok_or(PersistenceError::ContentNotFound(content_id))
    }

    async fn load_location(&self, location_id: LocationId) -> Result<Location, PersistenceError> {
        self.read()
            .locations
            .get(&location_id)
            .cloned()
            .ok_or(PersistenceError::LocationNotFound(location_id))
    }

    async fn load_locations_by_content(
        &self,
        content_id: ContentId,
    ) -> Result<Vec<Location>, PersistenceError> {
        let store = self.read();
        if !store.infos.contains_key(&content_id) {
            return Err(PersistenceError::ContentNotFound(content_id));
        }

        Ok(store
            .locations
            .values()
            .filter(|location| location.content_id == content_id)
            .cloned()
            .collect())
    }

    async fn load_subtree(&self, root: LocationId) -> Result<Vec<Location>, PersistenceError> {
        let store = self.read();
        if !store.locations.contains_key(&root) {
            return Err(PersistenceError::LocationNotFound(root));
        }

        let mut subtree: Vec<Location> = store
            .locations
            .values()
            .filter(|location| location.is_in_subtree(root))
            .cloned()
            .collect();
        subtree.sort_by_key(|location| (location.depth, location.id));
        Ok(subtree)
    }

    async fn content_versions(&self) -> Result<Vec<(ContentId, VersionNo)>, PersistenceError> {
        Ok(self
            .read()
            .infos
            .values()
            .map(|info| (info.id, info.current_version_no))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn content(id: u64, version: u64, current: u64) -> Content {
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
            fields: vec![],
        }
    }

    fn location(id: u64, content_id: u64, path: &str, depth: u32) -> Location {
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

    #[tokio::test]
    async fn test_load_content_version() {
        let persistence = InMemoryPersistence::new();
        persistence.insert_content(content(1, 1, 1));
        persistence.insert_content(content(1, 2, 2));

        let loaded = persistence
            .load_content(ContentId(1), VersionNo(1))
            .await
            .unwrap();

        assert_eq!(loaded.version_no, VersionNo(1));
        assert_eq!(loaded.info.current_version_no, VersionNo(2));
    }

    #[tokio::test]
    async fn test_load_missing_version() {
        let persistence = InMemoryPersistence::new();
        persistence.insert_content(content(1, 2, 2));
        persistence.remove_version(ContentId(1), VersionNo(2));

        let err = persistence
            .load_content(ContentId(1), VersionNo(2))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            PersistenceError::version_not_found(ContentId(1), VersionNo(2))
        );
    }

    #[tokio::test]
    async fn test_content_versions_scan() {
        let persistence = InMemoryPersistence::new();
        persistence.insert_content(content(3, 1, 1));
        persistence.insert_content(content(1, 1, 4));
        persistence.insert_content(content(1, 4, 4));

        let scan = persistence.content_versions().await.unwrap();

        assert_eq!(
            scan,
            vec![(ContentId(1), VersionNo(4)), (ContentId(3), VersionNo(1))]
        );
    }

    #[tokio::test]
    async fn test_load_subtree() {
        let persistence = InMemoryPersistence::new();
        persistence.insert_location(location(1, 100, "/1/", 0));
        persistence.insert_location(location(2, 101, "/1/2/", 1));
        persistence.insert_location(location(5, 102, "/1/2/5/", 2));
        persistence.insert_location(location(3, 103, "/1/3/", 1));

        let subtree = persistence.load_subtree(LocationId(2)).await.unwrap();
        let ids: Vec<_> = subtree.iter().map(|l| l.id).collect();

        assert_eq!(ids, vec![LocationId(2), LocationId(5)]);
        assert!(persistence.load_subtree(LocationId(9)).await.is_err());
    }

    #[test]
    fn test_from_fixture() {
        let fixture = Fixture {
            contents: vec![content(1, 1, 1), content(2, 1, 1)],
            locations: vec![location(10, 1, "/1/10/", 1)],
        };

        let persistence = InMemoryPersistence::from_fixture(fixture);
        assert_eq!(persistence.content_count(), 2);
    }
}
