//! Notification handlers: authoring, webhook ingestion, edits, history.

use axum::Json;
use axum::extract::{Path, State};

use relay_core::error::AppError;
use relay_core::types::NotificationId;
use relay_entity::history::EditHistoryEntry;
use relay_entity::notification::{NotificationAction, NotificationStatus, NotificationView};
use relay_service::notification::NotificationUpdate;

use crate::dto::request::{CreateNotificationRequest, UpdateNotificationRequest, WebhookRequest};
use crate::dto::response::NotificationResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<NotificationView>>, ApiError> {
    let notifications = state.notification_service.list(&auth).await?;
    Ok(Json(notifications))
}

/// GET /api/notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<NotificationId>,
) -> Result<Json<NotificationView>, ApiError> {
    let notification = state.notification_service.get(&auth, id).await?;
    Ok(Json(notification))
}

/// POST /api/notifications/create
pub async fn create_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(req): JsonBody<CreateNotificationRequest>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let is_draft = req.is_draft;
    let outcome = state
        .notification_service
        .create(&auth, req.into())
        .await?;

    let message = if is_draft {
        "Draft saved successfully".to_string()
    } else if let Some(delivery) = &outcome.delivery {
        format!(
            "Notification sent to {} recipients",
            delivery.scope.audience_size()
        )
    } else {
        "Notification created successfully".to_string()
    };

    Ok(Json(NotificationResponse {
        success: true,
        notification: outcome.notification.into(),
        message: Some(message),
    }))
}

/// POST /api/notifications/webhook/notification
///
/// No session: external producers push release notes here.
pub async fn ingest_webhook(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<WebhookRequest>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let notification = state
        .notification_service
        .ingest_webhook(req.into())
        .await?;
    Ok(Json(NotificationResponse {
        success: true,
        notification: notification.into(),
        message: None,
    }))
}

/// PUT /api/notifications/{id}
pub async fn update_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<NotificationId>,
    JsonBody(req): JsonBody<UpdateNotificationRequest>,
) -> Result<Json<NotificationView>, ApiError> {
    let status = req
        .status
        .as_deref()
        .map(str::parse::<NotificationStatus>)
        .transpose()
        .map_err(AppError::validation)?;
    let action = req
        .action
        .as_deref()
        .map(str::parse::<NotificationAction>)
        .transpose()
        .map_err(AppError::validation)?;

    let updated = state
        .notification_service
        .update(
            &auth,
            id,
            NotificationUpdate {
                content: req.content,
                status,
                action,
            },
        )
        .await?;
    Ok(Json(updated))
}

/// GET /api/notifications/{id}/history
pub async fn edit_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<NotificationId>,
) -> Result<Json<Vec<EditHistoryEntry>>, ApiError> {
    let history = state.notification_service.history(&auth, id).await?;
    Ok(Json(history))
}
