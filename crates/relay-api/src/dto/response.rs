//! Response DTOs.

use serde::Serialize;

use relay_entity::application::Application;
use relay_entity::delivery::{DeliveryRecord, DispatchResult};
use relay_entity::notification::NotificationView;
use relay_entity::recipient::Recipient;
use relay_entity::tracking::TrackingAggregate;
use relay_core::types::RecipientId;
use relay_service::notification::BulkSendSummary;

/// Simple acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    /// Successful acknowledgement with a message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// A created or ingested notification.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub success: bool,
    pub notification: NotificationView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Result of a direct send.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResponse {
    pub success: bool,
    pub message: String,
    pub sent_release: DeliveryRecord,
}

/// Result of a bulk send.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkSendResponse {
    pub success: bool,
    pub message: String,
    pub sent_release: DeliveryRecord,
    pub summary: BulkSendSummary,
    pub results: Vec<DispatchResult>,
}

/// Result of an open callback.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackOpenResponse {
    pub success: bool,
    pub message: String,
    pub already_tracked: bool,
    pub tracking: TrackingAggregate,
}

/// Result of a delete.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse<T: Serialize> {
    pub success: bool,
    pub deleted: T,
}

impl<T: Serialize> DeletedResponse<T> {
    /// Wraps the removed item.
    pub fn of(deleted: T) -> Self {
        Self {
            success: true,
            deleted,
        }
    }
}

/// What is echoed back when a recipient is deleted.
#[derive(Debug, Clone, Serialize)]
pub struct RecipientSummary {
    pub id: RecipientId,
    pub name: String,
    pub email: String,
}

impl From<Recipient> for RecipientSummary {
    fn from(recipient: Recipient) -> Self {
        Self {
            id: recipient.id,
            name: recipient.name,
            email: recipient.email,
        }
    }
}

/// An application as shown to clients; the key itself is never returned.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    #[serde(flatten)]
    pub application: Application,
    pub has_api_key: bool,
}

impl From<Application> for ApplicationResponse {
    fn from(application: Application) -> Self {
        Self {
            has_api_key: application.bearer_token().is_some(),
            application,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub connected_clients: usize,
}
