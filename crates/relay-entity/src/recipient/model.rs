//! Recipient entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use relay_core::traits::Document;
use relay_core::types::{GroupId, RecipientId};

/// A contact that can receive a notification directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// Unique recipient identifier.
    pub id: RecipientId,
    /// Display name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Free-text role label (e.g. "Engineering Team").
    pub role: String,
    /// Optional membership in one group.
    pub group_id: Option<GroupId>,
    /// When the recipient was created.
    pub created_at: DateTime<Utc>,
    /// When the recipient was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Recipient {
    /// Denormalized copy stored in delivery records.
    pub fn snapshot(&self) -> RecipientSnapshot {
        RecipientSnapshot {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
        }
    }
}

impl Document for Recipient {
    type Id = RecipientId;

    fn id(&self) -> RecipientId {
        self.id
    }
}

/// Recipient as it was at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientSnapshot {
    /// Recipient id.
    pub id: RecipientId,
    /// Name at send time.
    pub name: String,
    /// Email at send time.
    pub email: String,
    /// Role at send time.
    pub role: String,
}
