//! Concurrent per-application dispatch with partial-failure accounting.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use tracing::{info, warn};

use relay_entity::application::Application;
use relay_entity::delivery::DispatchResult;
use relay_entity::group::{Group, GroupMember};
use relay_entity::notification::Notification;

use super::payload::DispatchPayload;
use super::transport::{DispatchTarget, DispatchTransport};

/// Results of one fan-out, one per target application.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    /// Per-target results in the order the targets were given.
    pub results: Vec<DispatchResult>,
}

impl DispatchOutcome {
    /// Number of targets.
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of targets that acknowledged with a success status.
    pub fn successful(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    /// Number of targets that failed.
    pub fn failed(&self) -> usize {
        self.total() - self.successful()
    }
}

/// Sends a notification to each target application independently.
///
/// No target's failure affects another. Nothing is retried.
#[derive(Debug, Clone)]
pub struct DispatchEngine {
    transport: Arc<dyn DispatchTransport>,
    callback_url: String,
}

impl DispatchEngine {
    /// Creates a new engine posting through `transport`.
    pub fn new(transport: Arc<dyn DispatchTransport>, callback_url: impl Into<String>) -> Self {
        Self {
            transport,
            callback_url: callback_url.into(),
        }
    }

    /// Dispatches to every application concurrently.
    pub async fn dispatch(
        &self,
        notification: &Notification,
        applications: &[Application],
        users: &[GroupMember],
        groups: &[Group],
        actor_email: &str,
    ) -> DispatchOutcome {
        let sent_at = Utc::now();
        let user_count = users.len();

        let attempts = applications.iter().map(|app| {
            let payload = DispatchPayload::build(
                notification,
                app,
                users,
                groups,
                actor_email,
                sent_at,
                &self.callback_url,
            );
            let target = DispatchTarget::from(app);
            async move {
                match self.transport.post(&target, &payload).await {
                    Ok(response) => {
                        info!(
                            notification_id = %notification.id,
                            application_id = %app.id,
                            status = response.status,
                            "Dispatched to application"
                        );
                        DispatchResult::responded(
                            app.id,
                            &app.name,
                            response.status,
                            user_count,
                            response.body,
                        )
                    }
                    Err(e) => {
                        warn!(
                            notification_id = %notification.id,
                            application_id = %app.id,
                            url = %target.url,
                            error = %e,
                            "Dispatch to application failed"
                        );
                        DispatchResult::failed(app.id, &app.name, user_count, e.to_string())
                    }
                }
            }
        });

        DispatchOutcome {
            results: join_all(attempts).await,
        }
    }
}
