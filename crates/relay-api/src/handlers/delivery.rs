//! Send handlers: direct recipients and bulk fan-out.

use axum::Json;
use axum::extract::{Path, State};

use relay_core::types::NotificationId;

use crate::dto::request::{SendBulkRequest, SendRequest};
use crate::dto::response::{BulkSendResponse, SendResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// POST /api/notifications/{id}/send
pub async fn send_to_recipients(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<NotificationId>,
    JsonBody(req): JsonBody<SendRequest>,
) -> Result<Json<SendResponse>, ApiError> {
    let delivery = state
        .notification_service
        .send_to_recipients(&auth, id, &req.recipient_ids)
        .await?;
    Ok(Json(SendResponse {
        success: true,
        message: format!(
            "Release notes sent to {} recipients",
            delivery.scope.audience_size()
        ),
        sent_release: delivery,
    }))
}

/// POST /api/notifications/{id}/send-bulk
///
/// Succeeds even when some applications fail; see `results`.
pub async fn send_bulk(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<NotificationId>,
    JsonBody(req): JsonBody<SendBulkRequest>,
) -> Result<Json<BulkSendResponse>, ApiError> {
    let outcome = state
        .notification_service
        .send_bulk(&auth, id, &req.group_ids, &req.application_ids)
        .await?;
    Ok(Json(BulkSendResponse {
        success: true,
        message: format!(
            "Notification sent to {} users across {} application(s)",
            outcome.summary.total_users, outcome.summary.total_applications
        ),
        sent_release: outcome.delivery,
        summary: outcome.summary,
        results: outcome.results,
    }))
}
