//! Domain signals.
//!
//! A signal is emitted after a mutation has been committed to persistence.
//! Each variant carries only the identifiers its slot needs; slots load the
//! actual state themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

use search_sync_shared::{ContentId, LocationId, VersionNo};

/// A version of a content object was published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishVersionSignal {
    pub content_id: ContentId,
    pub version_no: VersionNo,
}

/// A content object was deleted together with its locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteContentSignal {
    pub content_id: ContentId,
    /// Locations removed along with the content.
    #[serde(default)]
    pub affected_location_ids: Vec<LocationId>,
}

/// A new location was created for an existing content object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateLocationSignal {
    pub content_id: ContentId,
    pub location_id: LocationId,
}

/// Location properties such as priority were updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateLocationSignal {
    pub content_id: ContentId,
    pub location_id: LocationId,
}

/// A location was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteLocationSignal {
    pub content_id: ContentId,
    pub location_id: LocationId,
}

/// A location was hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HideLocationSignal {
    pub content_id: ContentId,
    pub current_version_no: VersionNo,
    pub location_id: LocationId,
}

/// A hidden location was revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnhideLocationSignal {
    pub content_id: ContentId,
    pub current_version_no: VersionNo,
    pub location_id: LocationId,
}

/// Two locations exchanged the content placed at them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapLocationSignal {
    pub content1_id: ContentId,
    pub location1_id: LocationId,
    pub content2_id: ContentId,
    pub location2_id: LocationId,
}

/// A subtree was moved under a new parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSubtreeSignal {
    pub subtree_id: LocationId,
    pub new_parent_location_id: LocationId,
}

/// An immutable record of a committed domain mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    PublishVersion(PublishVersionSignal),
    DeleteContent(DeleteContentSignal),
    CreateLocation(CreateLocationSignal),
    UpdateLocation(UpdateLocationSignal),
    DeleteLocation(DeleteLocationSignal),
    HideLocation(HideLocationSignal),
    UnhideLocation(UnhideLocationSignal),
    SwapLocation(SwapLocationSignal),
    MoveSubtree(MoveSubtreeSignal),
}

impl Signal {
    /// The kind this signal is routed by.
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::PublishVersion(_) => SignalKind::PublishVersion,
            Self::DeleteContent(_) => SignalKind::DeleteContent,
            Self::CreateLocation(_) => SignalKind::CreateLocation,
            Self::UpdateLocation(_) => SignalKind::UpdateLocation,
            Self::DeleteLocation(_) => SignalKind::DeleteLocation,
            Self::HideLocation(_) => SignalKind::HideLocation,
            Self::UnhideLocation(_) => SignalKind::UnhideLocation,
            Self::SwapLocation(_) => SignalKind::SwapLocation,
            Self::MoveSubtree(_) => SignalKind::MoveSubtree,
        }
    }
}

/// Discriminant of [`Signal`], used as the dispatch table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalKind {
    PublishVersion,
    DeleteContent,
    CreateLocation,
    UpdateLocation,
    DeleteLocation,
    HideLocation,
    UnhideLocation,
    SwapLocation,
    MoveSubtree,
}

impl SignalKind {
    /// Every kind, in declaration order.
    pub const ALL: [SignalKind; 9] = [
        SignalKind::PublishVersion,
        SignalKind::DeleteContent,
        SignalKind::CreateLocation,
        SignalKind::UpdateLocation,
        SignalKind::DeleteLocation,
        SignalKind::HideLocation,
        SignalKind::UnhideLocation,
        SignalKind::SwapLocation,
        SignalKind::MoveSubtree,
    ];

    /// Stable name, matching the serialized `signal` tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PublishVersion => "publish_version",
            Self::DeleteContent => "delete_content",
            Self::CreateLocation => "create_location",
            Self::UpdateLocation => "update_location",
            Self::DeleteLocation => "delete_location",
            Self::HideLocation => "hide_location",
            Self::UnhideLocation => "unhide_location",
            Self::SwapLocation => "swap_location",
            Self::MoveSubtree => "move_subtree",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let signal = Signal::HideLocation(HideLocationSignal {
            content_id: ContentId(1),
            current_version_no: VersionNo(2),
            location_id: LocationId(3),
        });

        assert_eq!(signal.kind(), SignalKind::HideLocation);
        assert_eq!(signal.kind().to_string(), "hide_location");
    }

    #[test]
    fn test_deserialize_tagged() {
        let json = r#"{
            "signal": "hide_location",
            "content_id": 57,
            "current_version_no": 2,
            "location_id": 59
        }"#;

        let signal: Signal = serde_json::from_str(json).unwrap();

        assert_eq!(
            signal,
            Signal::HideLocation(HideLocationSignal {
                content_id: ContentId(57),
                current_version_no: VersionNo(2),
                location_id: LocationId(59),
            })
        );
    }

    #[test]
    fn test_tag_matches_kind_name() {
        let signal = Signal::MoveSubtree(MoveSubtreeSignal {
            subtree_id: LocationId(5),
            new_parent_location_id: LocationId(2),
        });

        let value = serde_json::to_value(&signal).unwrap();
        assert_eq!(value["signal"], signal.kind().as_str());
    }

    #[test]
    fn test_unknown_signal_rejected() {
        let json = r#"{ "signal": "assign_section", "content_id": 1 }"#;
        assert!(serde_json::from_str::<Signal>(json).is_err());
    }
}
