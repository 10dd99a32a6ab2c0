//! Search-engine-facing documents.
//!
//! Documents are built from a freshly loaded record every time something is
//! indexed; nothing in the sync core keeps them around.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{Content, Field};
use crate::ids::{ContentId, LocationId, VersionNo};
use crate::location::Location;

/// Document representing a content object in the search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub content_id: ContentId,
    pub version_no: VersionNo,
    pub name: String,
    pub content_type_id: u64,
    pub section_id: u64,
    pub main_language_code: String,
    pub language_codes: Vec<String>,
    pub main_location_id: Option<LocationId>,
    pub fields: Vec<Field>,
    /// All field values joined for full-text matching.
    pub full_text: String,
    pub modified: DateTime<Utc>,
    pub indexed_at: DateTime<Utc>,
}

impl ContentDocument {
    /// Build the document for a loaded content version.
    pub fn from_content(content: &Content) -> Self {
        let full_text = content
            .fields
            .iter()
            .map(|field| field.value.as_str())
            .filter(|value| !value.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            content_id: content.info.id,
            version_no: content.version_no,
            name: content.info.name.clone(),
            content_type_id: content.info.content_type_id,
            section_id: content.info.section_id,
            main_language_code: content.info.main_language_code.clone(),
            language_codes: content.language_codes.clone(),
            main_location_id: content.info.main_location_id,
            fields: content.fields.clone(),
            full_text,
            modified: content.info.modified,
            indexed_at: Utc::now(),
        }
    }

    /// Stable document identifier used by search backends.
    pub fn document_id(&self) -> String {
        content_document_id(self.content_id)
    }
}

/// Document representing a location in the search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDocument {
    pub location_id: LocationId,
    pub content_id: ContentId,
    pub parent_id: Option<LocationId>,
    pub path_string: String,
    pub path: Vec<LocationId>,
    pub depth: u32,
    pub priority: i32,
    pub hidden: bool,
    pub invisible: bool,
    pub indexed_at: DateTime<Utc>,
}

impl LocationDocument {
    /// Build the document for a loaded location.
    pub fn from_location(location: &Location) -> Self {
        Self {
            location_id: location.id,
            content_id: location.content_id,
            parent_id: location.parent_id,
            path_string: location.path_string.clone(),
            path: location.path(),
            depth: location.depth,
            priority: location.priority,
            hidden: location.hidden,
            invisible: location.invisible,
            indexed_at: Utc::now(),
        }
    }

    /// Stable document identifier used by search backends.
    pub fn document_id(&self) -> String {
        location_document_id(self.location_id)
    }
}

/// Document id for a content object, shared by all of its versions.
pub fn content_document_id(content_id: ContentId) -> String {
    format!("content{}", content_id)
}

/// Document id for a location.
pub fn location_document_id(location_id: LocationId) -> String {
    format!("location{}", location_id)
}
