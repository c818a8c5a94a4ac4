//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use relay_auth::SessionManager;
use relay_core::config::AppConfig;
use relay_realtime::PushChannelRegistry;
use relay_service::{
    ApplicationService, GroupService, NotificationService, RecipientService, TrackingService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// Login, logout, and token validation
    pub session_manager: Arc<SessionManager>,

    // ── Realtime ─────────────────────────────────────────────
    /// Live push channels keyed by user email
    pub channels: Arc<PushChannelRegistry>,

    // ── Services ─────────────────────────────────────────────
    /// Notification lifecycle and sends
    pub notification_service: Arc<NotificationService>,
    /// Open tracking and reports
    pub tracking_service: Arc<TrackingService>,
    /// Recipient management
    pub recipient_service: Arc<RecipientService>,
    /// Group management
    pub group_service: Arc<GroupService>,
    /// Application management
    pub application_service: Arc<ApplicationService>,
}
