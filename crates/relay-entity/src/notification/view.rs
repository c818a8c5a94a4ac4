//! Client-facing notification representation.

use serde::Serialize;

use super::model::Notification;

/// A notification plus the fields clients derive from its metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    /// The notification itself.
    #[serde(flatten)]
    pub notification: Notification,
    /// Source label (`pm_created`, `external`, ...).
    pub source: String,
    /// Author display name for authored notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl From<Notification> for NotificationView {
    fn from(notification: Notification) -> Self {
        let source = notification.metadata.source().to_string();
        let created_by = notification.metadata.created_by().map(str::to_string);
        Self {
            notification,
            source,
            created_by,
        }
    }
}
