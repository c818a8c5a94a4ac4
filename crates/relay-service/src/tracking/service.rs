//! Tracking aggregator.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use relay_core::error::AppError;
use relay_core::types::{ApplicationId, DeliveryId, NotificationId, UserId};
use relay_database::repositories::{DeliveryRepository, NotificationRepository};
use relay_entity::tracking::{OpenedUser, TrackingAggregate, TrackingReport};

use crate::context::RequestContext;

/// Name recorded when the callback does not say which application was used.
const UNKNOWN_APPLICATION: &str = "Unknown";

/// An open reported by an external application.
#[derive(Debug, Clone, Default)]
pub struct OpenEvent {
    /// Delivery record the open belongs to.
    pub delivery_id: Option<DeliveryId>,
    /// Used to find the latest tracked record when `delivery_id` is absent.
    pub notification_id: Option<NotificationId>,
    pub user_id: Option<UserId>,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
    pub application_id: Option<ApplicationId>,
    pub application_name: Option<String>,
    pub opened_at: Option<DateTime<Utc>>,
}

/// Result of recording an open.
#[derive(Debug, Clone)]
pub struct OpenRecorded {
    /// Record the open was applied to.
    pub delivery_id: DeliveryId,
    /// Aggregate after the call.
    pub tracking: TrackingAggregate,
    /// The user had already been counted; nothing changed.
    pub already_tracked: bool,
}

/// Ingests open events and reports on them.
#[derive(Debug, Clone)]
pub struct TrackingService {
    deliveries: DeliveryRepository,
    notifications: NotificationRepository,
}

impl TrackingService {
    /// Creates a new tracking service.
    pub fn new(deliveries: DeliveryRepository, notifications: NotificationRepository) -> Self {
        Self {
            deliveries,
            notifications,
        }
    }

    /// Records that a user opened a delivered notification.
    ///
    /// Idempotent per user and record. The record's aggregate and the
    /// notification mirror are updated while the record's lock is held,
    /// so concurrent opens on the same record are never lost.
    pub async fn record_open(&self, event: OpenEvent) -> Result<OpenRecorded, AppError> {
        const MISSING: &str = "deliveryRecordId or notificationId, and userId are required";
        let user_id = event.user_id.ok_or_else(|| AppError::validation(MISSING))?;

        let delivery_id = match (event.delivery_id, event.notification_id) {
            (Some(id), _) => id,
            (None, Some(notification_id)) => self
                .deliveries
                .find_latest_tracked(notification_id)
                .await?
                .map(|record| record.id)
                .ok_or_else(|| AppError::not_found("Sent release record not found"))?,
            (None, None) => return Err(AppError::validation(MISSING)),
        };

        let email = event.user_email.unwrap_or_default();
        let opened = OpenedUser {
            user_id,
            name: event
                .user_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| email.clone()),
            email,
            opened_at: event.opened_at.unwrap_or_else(Utc::now),
            application_id: event.application_id,
            application_name: event
                .application_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_APPLICATION.to_string()),
        };

        let notifications = self.notifications.clone();
        let (tracking, added) =
            self.deliveries
                .update_tracking(delivery_id, |notification_id, tracking| {
                    let added = tracking.record_open(opened);
                    if added {
                        notifications.mirror_tracking(notification_id, delivery_id, tracking);
                    }
                    (tracking.clone(), added)
                })?;

        if added {
            info!(
                delivery_id = %delivery_id,
                user_id = %user_id,
                opened = tracking.opened,
                total = tracking.total_sent,
                open_rate = tracking.open_rate,
                "Open tracked"
            );
        } else {
            debug!(delivery_id = %delivery_id, user_id = %user_id, "Open already tracked");
        }

        Ok(OpenRecorded {
            delivery_id,
            tracking,
            already_tracked: !added,
        })
    }

    /// Tracking report for the latest tracked delivery of one of the
    /// caller's notifications. Zeroed if it was never bulk-sent.
    pub async fn report(
        &self,
        ctx: &RequestContext,
        notification_id: NotificationId,
    ) -> Result<TrackingReport, AppError> {
        self.notifications
            .find_for_owner(notification_id, &ctx.email)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))?;

        Ok(
            match self.deliveries.find_latest_tracked(notification_id).await? {
                Some(record) => TrackingReport::from_record(&record),
                None => TrackingReport::empty(notification_id),
            },
        )
    }

    /// Tracking report for one delivery record of the caller's.
    ///
    /// Direct deliveries carry no tracking and yield a zeroed report.
    pub async fn delivery_report(
        &self,
        ctx: &RequestContext,
        delivery_id: DeliveryId,
    ) -> Result<TrackingReport, AppError> {
        let record = self
            .deliveries
            .find_by_id(delivery_id)
            .await?
            .ok_or_else(|| AppError::not_found("Sent release record not found"))?;
        self.notifications
            .find_for_owner(record.notification_id, &ctx.email)
            .await?
            .ok_or_else(|| AppError::not_found("Sent release record not found"))?;
        Ok(TrackingReport::from_record(&record))
    }
}
