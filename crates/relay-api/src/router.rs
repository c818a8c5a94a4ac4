//! Route definitions for the relay HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_request = state.config.notifications.max_request_bytes;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(notification_routes())
        .merge(delivery_routes())
        .merge(tracking_routes())
        .merge(recipient_routes())
        .merge(group_routes())
        .merge(application_routes())
        .merge(event_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_request))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Login, logout, current user
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Authoring, webhook ingestion, edits, history
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(handlers::notification::list_notifications))
        .route(
            "/notifications/create",
            post(handlers::notification::create_notification),
        )
        .route(
            "/notifications/webhook/notification",
            post(handlers::notification::ingest_webhook),
        )
        .route(
            "/notifications/{id}",
            get(handlers::notification::get_notification)
                .put(handlers::notification::update_notification),
        )
        .route(
            "/notifications/{id}/history",
            get(handlers::notification::edit_history),
        )
}

/// Direct and bulk sends
fn delivery_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications/{id}/send",
            post(handlers::delivery::send_to_recipients),
        )
        .route(
            "/notifications/{id}/send-bulk",
            post(handlers::delivery::send_bulk),
        )
}

/// Open callbacks and reports
fn tracking_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications/track-open",
            post(handlers::tracking::track_open),
        )
        .route(
            "/notifications/{id}/tracking",
            get(handlers::tracking::tracking_report),
        )
        .route(
            "/deliveries/{id}/tracking",
            get(handlers::tracking::delivery_report),
        )
}

fn recipient_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/recipients",
            get(handlers::recipient::list_recipients).post(handlers::recipient::create_recipient),
        )
        .route(
            "/recipients/{id}",
            put(handlers::recipient::update_recipient).delete(handlers::recipient::delete_recipient),
        )
}

fn group_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/groups",
            get(handlers::group::list_groups).post(handlers::group::create_group),
        )
        .route(
            "/groups/{id}",
            put(handlers::group::update_group).delete(handlers::group::delete_group),
        )
}

fn application_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/applications",
            get(handlers::application::list_applications)
                .post(handlers::application::create_application),
        )
        .route(
            "/applications/{id}",
            put(handlers::application::update_application)
                .delete(handlers::application::delete_application),
        )
}

/// Server-sent event stream
fn event_routes() -> Router<AppState> {
    Router::new().route("/events", get(handlers::events::subscribe))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
