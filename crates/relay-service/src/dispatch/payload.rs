//! Wire format of the request sent to each application.

use chrono::{DateTime, Utc};
use serde::Serialize;

use relay_core::types::{ApplicationId, GroupId, NotificationId};
use relay_entity::application::Application;
use relay_entity::delivery::NamedRef;
use relay_entity::group::{Group, GroupMember};
use relay_entity::notification::Notification;

/// Value of the `source` field.
pub const PAYLOAD_SOURCE: &str = "PM_INTERFACE";

/// JSON body posted to an application's notification endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchPayload {
    pub source: &'static str,
    pub notification_id: NotificationId,
    pub title: String,
    pub content: String,
    pub priority: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub target_users: Vec<GroupMember>,
    pub metadata: DispatchMetadata,
    pub tracking_enabled: bool,
    pub tracking_callback_url: String,
}

/// `metadata` block of a dispatch payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchMetadata {
    pub sent_by: String,
    pub sent_at: DateTime<Utc>,
    pub jira_release_notes: String,
    pub groups: Vec<NamedRef<GroupId>>,
    pub application_id: ApplicationId,
    pub application_name: String,
}

impl DispatchPayload {
    /// Builds the payload for one target application.
    pub fn build(
        notification: &Notification,
        application: &Application,
        users: &[GroupMember],
        groups: &[Group],
        sent_by: &str,
        sent_at: DateTime<Utc>,
        callback_url: &str,
    ) -> Self {
        Self {
            source: PAYLOAD_SOURCE,
            notification_id: notification.id,
            title: notification.title.clone(),
            content: notification.content.clone(),
            priority: "high",
            kind: "release_notes",
            target_users: users.to_vec(),
            metadata: DispatchMetadata {
                sent_by: sent_by.to_string(),
                sent_at,
                jira_release_notes: notification.jira_release_notes.clone(),
                groups: groups.iter().map(|g| NamedRef::new(g.id, &g.name)).collect(),
                application_id: application.id,
                application_name: application.name.clone(),
            },
            tracking_enabled: true,
            tracking_callback_url: callback_url.to_string(),
        }
    }
}
