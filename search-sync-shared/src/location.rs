//! Location records of the content tree.

use serde::{Deserialize, Serialize};

use crate::ids::{ContentId, LocationId};

/// A placement of a content object in the content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// The location's unique identifier.
    pub id: LocationId,
    /// Content placed at this location.
    pub content_id: ContentId,
    /// Parent location; `None` for the tree root.
    #[serde(default)]
    pub parent_id: Option<LocationId>,
    /// Materialized path, e.g. `/1/2/42/`.
    pub path_string: String,
    /// Depth in the tree, the root being 0.
    #[serde(default)]
    pub depth: u32,
    /// Sort priority among siblings.
    #[serde(default)]
    pub priority: i32,
    /// Explicitly hidden by an editor.
    #[serde(default)]
    pub hidden: bool,
    /// Hidden or below a hidden ancestor.
    #[serde(default)]
    pub invisible: bool,
}

impl Location {
    /// Location ids along the path, root first.
    pub fn path(&self) -> Vec<LocationId> {
        self.path_string
            .split('/')
            .filter_map(|segment| segment.parse::<u64>().ok())
            .map(LocationId)
            .collect()
    }

    /// Whether this location lies in the subtree rooted at `root`, itself included.
    pub fn is_in_subtree(&self, root: LocationId) -> bool {
        self.path().contains(&root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(id: u64, path: &str) -> Location {
        Location {
            id: LocationId(id),
            content_id: ContentId(id + 100),
            parent_id: None,
            path_string: path.to_string(),
            depth: 0,
            priority: 0,
            hidden: false,
            invisible: false,
        }
    }

    #[test]
    fn test_path() {
        let loc = location(42, "/1/2/42/");
        assert_eq!(loc.path(), vec![LocationId(1), LocationId(2), LocationId(42)]);
    }

    #[test]
    fn test_is_in_subtree() {
        let loc = location(42, "/1/2/42/");
        assert!(loc.is_in_subtree(LocationId(2)));
        assert!(loc.is_in_subtree(LocationId(42)));
        assert!(!loc.is_in_subtree(LocationId(5)));
    }
}
