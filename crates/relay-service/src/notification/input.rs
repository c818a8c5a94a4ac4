//! Inputs and outcomes of notification operations.

use serde::Serialize;
use serde_json::Value;

use relay_core::types::{ApplicationId, GroupId, RecipientId};
use relay_entity::delivery::{DeliveryRecord, DispatchResult, NamedRef};
use relay_entity::notification::{Notification, NotificationAction, NotificationStatus};

/// A notification authored through the relay.
#[derive(Debug, Clone, Default)]
pub struct NewNotification {
    pub title: String,
    pub content: String,
    pub jira_release_notes: Option<String>,
    pub is_draft: bool,
    /// Source label; `pm_created` when absent.
    pub source: Option<String>,
    /// Recipients to send to right away. Ignored for drafts.
    pub recipient_ids: Vec<RecipientId>,
}

/// A notification pushed in by an external producer.
#[derive(Debug, Clone, Default)]
pub struct IncomingWebhook {
    pub target_email: String,
    pub title: String,
    pub content: String,
    pub jira_release_notes: Option<String>,
    pub metadata: Option<Value>,
}

/// Owner-requested changes. Absent fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct NotificationUpdate {
    pub content: Option<String>,
    pub status: Option<NotificationStatus>,
    pub action: Option<NotificationAction>,
}

impl NotificationUpdate {
    /// Whether the update asks for nothing.
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.status.is_none() && self.action.is_none()
    }
}

/// Result of authoring a notification.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    /// The notification as stored after the operation.
    pub notification: Notification,
    /// Delivery record when recipients were given.
    pub delivery: Option<DeliveryRecord>,
}

/// Result of a bulk send.
#[derive(Debug, Clone)]
pub struct BulkSendOutcome {
    pub delivery: DeliveryRecord,
    pub summary: BulkSendSummary,
    pub results: Vec<DispatchResult>,
}

/// Counts reported back to the sender of a bulk send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSendSummary {
    pub total_applications: usize,
    pub successful_applications: usize,
    pub failed_applications: usize,
    pub total_users: usize,
    pub groups: Vec<GroupSummary>,
    pub applications: Vec<NamedRef<ApplicationId>>,
}

/// A group that took part in a bulk send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub id: GroupId,
    pub name: String,
    pub user_count: usize,
}
