//! # Search Sync Shared
//!
//! Read-only repository records and the index documents derived from them.
//!
//! The sync core never mutates a [`Content`] or a [`Location`]; it loads them
//! from persistence and turns them into [`ContentDocument`] and
//! [`LocationDocument`] values at index time.

mod content;
mod document;
mod ids;
mod location;

pub use content::{Content, ContentInfo, Field};
pub use document::{
    content_document_id, location_document_id, ContentDocument, LocationDocument,
};
pub use ids::{ContentId, LocationId, VersionNo};
pub use location::Location;
