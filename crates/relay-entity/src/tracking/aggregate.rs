//! Running open statistics for one delivery record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use relay_core::types::{ApplicationId, UserId};

/// Rounded percentage of `opened` over `total`, 0 when `total` is 0.
///
/// Halves round up, matching `round(opened / total * 100)`.
pub fn open_rate(opened: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((opened * 200 + total) / (2 * total)) as u32
}

/// Open statistics attached to a delivery record and mirrored on its
/// notification.
///
/// Mutate only through [`TrackingAggregate::record_open`] so that
/// `opened == opened_users.len()` and `open_rate` always agree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingAggregate {
    /// Number of users the notification was sent to.
    pub total_sent: usize,
    /// Number of distinct users who opened it.
    pub opened: usize,
    /// Distinct openers, in arrival order.
    pub opened_users: Vec<OpenedUser>,
    /// `opened / total_sent` as a rounded percentage.
    pub open_rate: u32,
    /// Timestamp of the most recent recorded open.
    pub last_opened_at: Option<DateTime<Utc>>,
}

impl TrackingAggregate {
    /// Fresh aggregate for an audience of `total_sent` users.
    pub fn new(total_sent: usize) -> Self {
        Self {
            total_sent,
            opened: 0,
            opened_users: Vec::new(),
            open_rate: 0,
            last_opened_at: None,
        }
    }

    /// Whether the user already has a recorded open.
    pub fn has_opened(&self, user_id: UserId) -> bool {
        self.opened_users.iter().any(|u| u.user_id == user_id)
    }

    /// Records an open. Returns `false` without changes if the user was
    /// already counted.
    pub fn record_open(&mut self, open: OpenedUser) -> bool {
        if self.has_opened(open.user_id) {
            return false;
        }
        self.last_opened_at = Some(open.opened_at);
        self.opened_users.push(open);
        self.opened = self.opened_users.len();
        self.open_rate = open_rate(self.opened, self.total_sent);
        true
    }
}

/// A user who opened a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenedUser {
    /// User id.
    pub user_id: UserId,
    /// Display name, falling back to the email.
    pub name: String,
    /// Email address.
    pub email: String,
    /// When the open happened.
    pub opened_at: DateTime<Utc>,
    /// Application the user opened it in.
    pub application_id: Option<ApplicationId>,
    /// Application name, `Unknown` when not reported.
    pub application_name: String,
}
