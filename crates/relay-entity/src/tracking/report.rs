//! Tracking report derived from a delivery record.

use chrono::{DateTime, Utc};
use serde::Serialize;

use relay_core::types::{ApplicationId, DeliveryId, NotificationId};

use super::aggregate::{OpenedUser, open_rate};
use crate::delivery::{DeliveryRecord, DeliveryScope};
use crate::group::GroupMember;

/// Open statistics for one notification's latest bulk delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingReport {
    /// Notification being reported on.
    pub notification_id: NotificationId,
    /// Delivery record the report was computed from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_id: Option<DeliveryId>,
    /// Number of users the notification was sent to.
    pub total_sent: usize,
    /// Number of distinct openers.
    pub total_opened: usize,
    /// Overall open rate percentage.
    pub open_rate: u32,
    /// Users who opened.
    pub opened_users: Vec<OpenedUser>,
    /// Users who have not opened yet.
    pub not_opened_users: Vec<GroupMember>,
    /// Per-application breakdown.
    pub by_application: Vec<ApplicationBreakdown>,
    /// Most recent open.
    pub last_opened_at: Option<DateTime<Utc>>,
}

/// Open statistics for one target application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationBreakdown {
    /// Application id.
    pub application_id: ApplicationId,
    /// Application name at send time.
    pub application_name: String,
    /// Users entitled to this application through a snapshotted group.
    pub total_sent: usize,
    /// Opens reported through this application.
    pub opened: usize,
    /// `opened / total_sent` as a rounded percentage.
    pub open_rate: u32,
}

impl TrackingReport {
    /// Report for a notification that was never bulk-sent.
    pub fn empty(notification_id: NotificationId) -> Self {
        Self {
            notification_id,
            delivery_id: None,
            total_sent: 0,
            total_opened: 0,
            open_rate: 0,
            opened_users: Vec::new(),
            not_opened_users: Vec::new(),
            by_application: Vec::new(),
            last_opened_at: None,
        }
    }

    /// Computes the report from a delivery record.
    ///
    /// Entitlement per application is decided from the groups snapshotted
    /// in the record, not from current group membership.
    pub fn from_record(record: &DeliveryRecord) -> Self {
        let (
            DeliveryScope::Bulk {
                groups,
                applications,
                users,
                ..
            },
            Some(tracking),
        ) = (&record.scope, &record.tracking)
        else {
            return Self::empty(record.notification_id);
        };

        let not_opened_users = users
            .iter()
            .filter(|u| !tracking.has_opened(u.user_id))
            .cloned()
            .collect();

        let by_application = applications
            .iter()
            .map(|app| {
                let opened = tracking
                    .opened_users
                    .iter()
                    .filter(|u| u.application_id == Some(app.id))
                    .count();
                let total_sent = users
                    .iter()
                    .filter(|user| {
                        groups
                            .iter()
                            .any(|g| g.has_member(user.user_id) && g.application_ids.contains(&app.id))
                    })
                    .count();
                ApplicationBreakdown {
                    application_id: app.id,
                    application_name: app.name.clone(),
                    total_sent,
                    opened,
                    open_rate: open_rate(opened, total_sent),
                }
            })
            .collect();

        Self {
            notification_id: record.notification_id,
            delivery_id: Some(record.id),
            total_sent: tracking.total_sent,
            total_opened: tracking.opened,
            open_rate: tracking.open_rate,
            opened_users: tracking.opened_users.clone(),
            not_opened_users,
            by_application,
            last_opened_at: tracking.last_opened_at,
        }
    }
}
