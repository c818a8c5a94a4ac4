//! Delivery record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use relay_core::traits::Document;
use relay_core::types::{DeliveryId, NotificationId};

use super::dispatch::DispatchResult;
use crate::application::ApplicationSnapshot;
use crate::group::{GroupMember, GroupSnapshot};
use crate::recipient::RecipientSnapshot;
use crate::tracking::TrackingAggregate;

/// Snapshot of one fan-out event.
///
/// Everything except `tracking` is fixed at creation. Snapshots are
/// denormalized so later edits to groups, applications, or recipients do
/// not rewrite history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    /// Unique delivery identifier.
    pub id: DeliveryId,
    /// Notification that was sent.
    pub notification_id: NotificationId,
    /// Email of the sender.
    pub sent_by: String,
    /// Title at send time.
    pub title: String,
    /// Content at send time.
    pub content: String,
    /// Who was targeted, and how.
    #[serde(flatten)]
    pub scope: DeliveryScope,
    /// Open tracking. Present for bulk sends only.
    pub tracking: Option<TrackingAggregate>,
    /// When the send happened.
    pub created_at: DateTime<Utc>,
}

impl Document for DeliveryRecord {
    type Id = DeliveryId;

    fn id(&self) -> DeliveryId {
        self.id
    }
}

/// Audience of a delivery record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum DeliveryScope {
    /// Sent to first-party recipients; no external dispatch.
    Direct {
        /// Recipients at send time.
        recipients: Vec<RecipientSnapshot>,
    },
    /// Dispatched to external applications for the users of some groups.
    Bulk {
        /// Groups at send time.
        groups: Vec<GroupSnapshot>,
        /// Target applications at send time.
        applications: Vec<ApplicationSnapshot>,
        /// Deduplicated union of group members.
        users: Vec<GroupMember>,
        /// Number of deduplicated users.
        total_users: usize,
        /// One result per target application.
        results: Vec<DispatchResult>,
    },
}

impl DeliveryScope {
    /// Number of people addressed by this delivery.
    pub fn audience_size(&self) -> usize {
        match self {
            Self::Direct { recipients } => recipients.len(),
            Self::Bulk { total_users, .. } => *total_users,
        }
    }
}
