//! Edit history entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use relay_core::traits::Document;
use relay_core::types::{EditHistoryId, NotificationId};

/// How a content edit was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditType {
    /// Typed by the author.
    Manual,
    /// Accepted from an AI suggestion.
    Ai,
}

/// One content edit of a notification. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditHistoryEntry {
    /// Unique entry identifier.
    pub id: EditHistoryId,
    /// Edited notification.
    pub notification_id: NotificationId,
    /// Editor email.
    pub user_email: String,
    /// Content before the edit.
    pub original_content: String,
    /// Content after the edit.
    pub edited_content: String,
    /// Edit kind.
    pub edit_type: EditType,
    /// When the edit happened.
    pub created_at: DateTime<Utc>,
}

impl Document for EditHistoryEntry {
    type Id = EditHistoryId;

    fn id(&self) -> EditHistoryId {
        self.id
    }
}
