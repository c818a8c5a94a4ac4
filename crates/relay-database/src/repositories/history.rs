//! Edit history repository implementation.

use std::sync::Arc;

use relay_core::result::AppResult;
use relay_core::types::{EditHistoryId, NotificationId};
use relay_entity::history::EditHistoryEntry;

use crate::store::{Collection, DocumentStore};

/// Append-only repository of content edits.
#[derive(Debug, Clone)]
pub struct EditHistoryRepository {
    entries: Arc<Collection<EditHistoryEntry>>,
}

impl EditHistoryRepository {
    /// Create a new edit history repository over the store.
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            entries: Arc::clone(&store.edit_history),
        }
    }

    /// Append an entry.
    pub async fn append(
        &self,
        build: impl FnOnce(EditHistoryId) -> EditHistoryEntry,
    ) -> AppResult<EditHistoryEntry> {
        Ok(self.entries.insert_with(build))
    }

    /// Entries of one notification, oldest first.
    pub async fn find_by_notification(
        &self,
        notification_id: NotificationId,
    ) -> AppResult<Vec<EditHistoryEntry>> {
        Ok(self.entries.filter(|e| e.notification_id == notification_id))
    }
}
