//! Application builder: wires repositories, services, and the router.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use relay_auth::SessionManager;
use relay_core::config::AppConfig;
use relay_core::result::AppResult;
use relay_database::DocumentStore;
use relay_database::repositories::{
    ApplicationRepository, DeliveryRepository, EditHistoryRepository, GroupRepository,
    NotificationRepository, RecipientRepository, UserRepository,
};
use relay_realtime::PushChannelRegistry;
use relay_service::{
    ApplicationService, DispatchEngine, GroupService, HttpTransport, NotificationRules,
    NotificationService, RecipientResolver, RecipientService, TrackingService,
};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared state over a (seeded) document store.
///
/// Repositories are created once and cloned into every service so they
/// share indexes.
pub fn build_state(config: AppConfig, store: &DocumentStore) -> AppResult<AppState> {
    // ── Step 1: Repositories ─────────────────────────────────────
    let users = UserRepository::new(store);
    let recipients = RecipientRepository::new(store);
    let groups = GroupRepository::new(store);
    let applications = ApplicationRepository::new(store);
    let notifications = NotificationRepository::new(store);
    let deliveries = DeliveryRepository::new(store);
    let history = EditHistoryRepository::new(store);

    // ── Step 2: Auth and realtime ────────────────────────────────
    let session_manager = Arc::new(SessionManager::new(&config.auth, users));
    let channels = Arc::new(PushChannelRegistry::new());

    // ── Step 3: Dispatch ─────────────────────────────────────────
    let transport = Arc::new(HttpTransport::new(&config.dispatch)?);
    let callback_url = config.server.tracking_callback_url();
    info!(callback_url = %callback_url, "Dispatch engine ready");
    let dispatcher = DispatchEngine::new(transport, callback_url);

    // ── Step 4: Services ─────────────────────────────────────────
    let resolver = RecipientResolver::new(recipients.clone(), groups.clone(), applications.clone());
    let notification_service = Arc::new(NotificationService::new(
        notifications.clone(),
        history,
        deliveries.clone(),
        resolver,
        dispatcher,
        Arc::clone(&channels),
        NotificationRules::new(&config.notifications),
    ));
    let tracking_service = Arc::new(TrackingService::new(deliveries, notifications));
    let recipient_service = Arc::new(RecipientService::new(recipients.clone(), groups.clone()));
    let group_service = Arc::new(GroupService::new(
        groups,
        recipients,
        applications.clone(),
    ));
    let application_service = Arc::new(ApplicationService::new(applications));

    Ok(AppState {
        config: Arc::new(config),
        session_manager,
        channels,
        notification_service,
        tracking_service,
        recipient_service,
        group_service,
        application_service,
    })
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
