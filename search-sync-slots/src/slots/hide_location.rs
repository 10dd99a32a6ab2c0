//! Slot for [`Signal::HideLocation`].

use async_trait::async_trait;

use crate::errors::SlotError;
use crate::signal::{Signal, SignalKind};
use crate::slot::{Slot, SlotHandlers};

/// Reindexes the content and the location after a location was hidden.
///
/// Both documents carry visibility flags derived from the location, so both
/// are rebuilt from what persistence holds now.
pub struct HideLocationSlot {
    handlers: SlotHandlers,
}

impl HideLocationSlot {
    pub fn new(handlers: SlotHandlers) -> Self {
        Self { handlers }
    }
}

#[async_trait]
impl Slot for HideLocationSlot {
    fn name(&self) -> &'static str {
        "hide_location"
    }

    fn kind(&self) -> SignalKind {
        SignalKind::HideLocation
    }

    async fn receive(&self, signal: &Signal) -> Result<(), SlotError> {
        let Signal::HideLocation(signal) = signal else {
            return Ok(());
        };

        self.handlers
            .index_content_version(signal.content_id, signal.current_version_no)
            .await?;
        self.handlers.index_location(signal.location_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::signal::HideLocationSignal;
    use crate::slots::test_support::{RejectingSearch, SlotFixture};
    use search_sync_repository::{IndexOperation, PersistenceError};
    use search_sync_shared::{ContentId, LocationId, VersionNo};

    fn hide(content_id: u64, version: u64, location_id: u64) -> Signal {
        Signal::HideLocation(HideLocationSignal {
            content_id: ContentId(content_id),
            current_version_no: VersionNo(version),
            location_id: LocationId(location_id),
        })
    }

    #[tokio::test]
    async fn test_indexes_content_and_location_once() {
        let fixture = SlotFixture::new();
        fixture.add_content(57, 2, 2);
        fixture.add_location(59, 57, "/1/2/59/");
        let slot = HideLocationSlot::new(fixture.handlers());

        slot.receive(&hide(57, 2, 59)).await.unwrap();

        assert_eq!(
            fixture.index.operations(),
            vec![
                IndexOperation::IndexContent {
                    content_id: ContentId(57),
                    version_no: VersionNo(2),
                },
                IndexOperation::IndexLocation(LocationId(59)),
            ]
        );
    }

    #[tokio::test]
    async fn test_indexes_state_read_at_receive_time() {
        let fixture = SlotFixture::new();
        fixture.add_content(57, 2, 2);
        let mut hidden = crate::slots::test_support::location(59, 57, "/1/2/59/");
        fixture.persistence.insert_location(hidden.clone());
        let slot = HideLocationSlot::new(fixture.handlers());

        // The location changes after the signal was emitted.
        hidden.hidden = true;
        hidden.invisible = true;
        fixture.persistence.insert_location(hidden);

        slot.receive(&hide(57, 2, 59)).await.unwrap();

        let doc = fixture.index.location_document(LocationId(59)).unwrap();
        assert!(doc.hidden);
        assert!(doc.invisible);
        let content_doc = fixture.index.content_document(ContentId(57)).unwrap();
        assert_eq!(content_doc.full_text, "Content 57 v2");
    }

    #[tokio::test]
    async fn test_ignores_other_signals() {
        let fixture = SlotFixture::new();
        let slot = HideLocationSlot::new(fixture.handlers());

        let signal = Signal::UnhideLocation(crate::signal::UnhideLocationSignal {
            content_id: ContentId(57),
            current_version_no: VersionNo(2),
            location_id: LocationId(59),
        });
        slot.receive(&signal).await.unwrap();

        assert!(fixture.index.operations().is_empty());
    }

    #[tokio::test]
    async fn test_missing_location_keeps_content_write() {
        let fixture = SlotFixture::new();
        fixture.add_content(57, 2, 2);
        let slot = HideLocationSlot::new(fixture.handlers());

        let err = slot.receive(&hide(57, 2, 59)).await.unwrap_err();

        assert_eq!(
            err,
            SlotError::PersistenceError(PersistenceError::LocationNotFound(LocationId(59)))
        );
        assert_eq!(fixture.index.operations().len(), 1);
    }

    #[tokio::test]
    async fn test_index_failure_is_surfaced() {
        let fixture = SlotFixture::new();
        fixture.add_content(57, 2, 2);
        fixture.add_location(59, 57, "/1/2/59/");
        let slot = HideLocationSlot::new(fixture.with_search(Arc::new(RejectingSearch)));

        let err = slot.receive(&hide(57, 2, 59)).await.unwrap_err();

        assert!(matches!(err, SlotError::SearchError(_)));
    }
}
