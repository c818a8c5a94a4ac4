//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use relay_core::traits::Document;
use relay_core::types::{ApplicationId, DeliveryId, GroupId, NotificationId};

use super::metadata::NotificationMetadata;
use super::status::{NotificationAction, NotificationStatus};
use crate::delivery::NamedRef;
use crate::tracking::TrackingAggregate;

/// An authored or ingested release note.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// Owner email (normalized).
    pub target_email: String,
    /// Title, at most 200 characters.
    pub title: String,
    /// Rich-text content.
    pub content: String,
    /// Free-text reference to the external issue tracker release.
    pub jira_release_notes: String,
    /// Origin-specific metadata.
    pub metadata: NotificationMetadata,
    /// Lifecycle status.
    pub status: NotificationStatus,
    /// Last accept/reject decision.
    pub action: Option<NotificationAction>,
    /// When the last action was taken.
    pub action_date: Option<DateTime<Utc>>,
    /// Who the notification was last sent to.
    #[serde(default)]
    pub sent_to: Vec<Addressee>,
    /// When the notification was last sent.
    pub sent_at: Option<DateTime<Utc>>,
    /// Groups and applications used by the last bulk send.
    pub sent_via: Option<SentVia>,
    /// Open tracking mirrored from the delivery record named by `sent_via`.
    pub tracking: Option<TrackingAggregate>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the notification was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// Whether `email` owns this notification.
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.target_email == crate::normalize_email(email)
    }

    /// Marks the notification as sent to the given audience.
    pub fn mark_sent(&mut self, sent_to: Vec<Addressee>, at: DateTime<Utc>) {
        self.status = NotificationStatus::Sent;
        self.sent_to = sent_to;
        self.sent_at = Some(at);
        self.updated_at = at;
    }
}

impl Document for Notification {
    type Id = NotificationId;

    fn id(&self) -> NotificationId {
        self.id
    }
}

/// Someone a notification was sent to.
///
/// `user_id` holds the recipient id for direct sends and the group user
/// id for bulk sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Addressee {
    /// Recipient or user id.
    pub user_id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Targets used by a bulk send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentVia {
    /// Delivery record created by that send; the only one mirrored.
    pub delivery_id: DeliveryId,
    /// Groups the audience was resolved from.
    pub groups: Vec<NamedRef<GroupId>>,
    /// Applications the notification was dispatched to.
    pub applications: Vec<NamedRef<ApplicationId>>,
}
