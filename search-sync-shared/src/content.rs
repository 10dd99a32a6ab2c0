//! Content records as loaded from persistence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ContentId, LocationId, VersionNo};

/// Version-independent metadata of a content object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentInfo {
    /// The content's unique identifier.
    pub id: ContentId,
    /// The currently published version.
    pub current_version_no: VersionNo,
    /// Display name in the main language.
    pub name: String,
    /// Content type the object was created from.
    pub content_type_id: u64,
    /// Section the object belongs to.
    pub section_id: u64,
    /// Main language code, e.g. `eng-GB`.
    pub main_language_code: String,
    /// Main location, if the content has been placed in the tree.
    #[serde(default)]
    pub main_location_id: Option<LocationId>,
    /// Whether any version has been published.
    #[serde(default = "default_published")]
    pub published: bool,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

fn default_published() -> bool {
    true
}

/// A single translated field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field definition identifier, e.g. `title`.
    pub identifier: String,
    /// Language of this value.
    pub language_code: String,
    /// Field value in its searchable text form.
    pub value: String,
}

impl Field {
    /// Create a new field value.
    pub fn new(
        identifier: impl Into<String>,
        language_code: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            language_code: language_code.into(),
            value: value.into(),
        }
    }
}

/// A content object at a specific version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Metadata shared by all versions.
    pub info: ContentInfo,
    /// The version these fields belong to.
    pub version_no: VersionNo,
    /// Languages the version is translated into.
    #[serde(default)]
    pub language_codes: Vec<String>,
    /// Field values of this version.
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Content {
    /// Shorthand for the content identifier.
    pub fn id(&self) -> ContentId {
        self.info.id
    }
}
