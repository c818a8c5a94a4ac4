//! Open tracking handlers.

use axum::Json;
use axum::extract::{Path, State};

use relay_core::types::{DeliveryId, NotificationId};
use relay_entity::tracking::TrackingReport;

use crate::dto::request::TrackOpenRequest;
use crate::dto::response::TrackOpenResponse;
use crate::error::{ApiError, validate_body};
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// POST /api/notifications/track-open
///
/// Called by external applications; no session.
pub async fn track_open(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<TrackOpenRequest>,
) -> Result<Json<TrackOpenResponse>, ApiError> {
    validate_body(&req)?;
    let recorded = state.tracking_service.record_open(req.into()).await?;
    let message = if recorded.already_tracked {
        "Already tracked"
    } else {
        "Notification open tracked successfully"
    };
    Ok(Json(TrackOpenResponse {
        success: true,
        message: message.to_string(),
        already_tracked: recorded.already_tracked,
        tracking: recorded.tracking,
    }))
}

/// GET /api/notifications/{id}/tracking
pub async fn tracking_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<NotificationId>,
) -> Result<Json<TrackingReport>, ApiError> {
    let report = state.tracking_service.report(&auth, id).await?;
    Ok(Json(report))
}

/// GET /api/deliveries/{id}/tracking
pub async fn delivery_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DeliveryId>,
) -> Result<Json<TrackingReport>, ApiError> {
    let report = state.tracking_service.delivery_report(&auth, id).await?;
    Ok(Json(report))
}
