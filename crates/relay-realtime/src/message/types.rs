//! Outbound event type definitions.

use serde::Serialize;

use relay_entity::notification::NotificationView;

/// Events sent by the server to a connected client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundEvent {
    /// Sent once when the channel opens.
    Connected {
        /// Greeting text.
        message: String,
    },
    /// Sent once after `Connected` with the user's backlog, newest first.
    Initial {
        /// Backlog notifications.
        notifications: Vec<NotificationView>,
    },
    /// A notification was created for, or updated by, the user.
    Notification {
        /// The notification.
        data: NotificationView,
    },
}

impl OutboundEvent {
    /// Greeting event.
    pub fn connected() -> Self {
        Self::Connected {
            message: "Connected to notification stream".to_string(),
        }
    }

    /// Event name used on the wire.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::Initial { .. } => "initial",
            Self::Notification { .. } => "notification",
        }
    }

    /// Serialize the event to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
