//! Persistence error types.

use search_sync_shared::{ContentId, LocationId, VersionNo};
use thiserror::Error;

/// Errors that can occur while reading from the content repository.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// No content object with this id exists.
    #[error("Content not found: content_id={0}")]
    ContentNotFound(ContentId),

    /// The content exists but the requested version does not.
    #[error("Version not found: content_id={content_id}, version_no={version_no}")]
    VersionNotFound {
        content_id: ContentId,
        version_no: VersionNo,
    },

    /// No location with this id exists.
    #[error("Location not found: location_id={0}")]
    LocationNotFound(LocationId),

    /// The storage backend failed.
    #[error("Backend error: {0}")]
    BackendError(String),
}

impl PersistenceError {
    /// Create a version not found error.
    pub fn version_not_found(content_id: ContentId, version_no: VersionNo) -> Self {
        Self::VersionNotFound {
            content_id,
            version_no,
        }
    }

    /// Create a backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::BackendError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_not_found_message() {
        let err = PersistenceError::version_not_found(ContentId(4), VersionNo(9));
        assert_eq!(
            err.to_string(),
            "Version not found: content_id=4, version_no=9"
        );
    }
}
