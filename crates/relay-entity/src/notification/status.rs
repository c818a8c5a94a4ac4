//! Notification status and action enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// Delivered to its owner, not yet read.
    Unread,
    /// Read by its owner.
    Read,
    /// Fanned out to recipients or applications.
    Sent,
    /// Rejected through an explicit action.
    Rejected,
    /// Saved but not published.
    Draft,
}

impl NotificationStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
            Self::Sent => "sent",
            Self::Rejected => "rejected",
            Self::Draft => "draft",
        }
    }

    /// Whether an owner may move a notification from `self` to `next`
    /// through a plain status update.
    ///
    /// `Sent` is only reachable through a send operation and `Rejected`
    /// only through the reject action.
    pub fn allows_manual_transition(&self, next: NotificationStatus) -> bool {
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Unread, Self::Read) | (Self::Read, Self::Unread) | (Self::Draft, Self::Unread)
        )
    }

    /// Whether a send operation may start from this status.
    pub fn is_sendable(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unread" => Ok(Self::Unread),
            "read" => Ok(Self::Read),
            "sent" => Ok(Self::Sent),
            "rejected" => Ok(Self::Rejected),
            "draft" => Ok(Self::Draft),
            other => Err(format!("Invalid notification status: {other}")),
        }
    }
}

/// Accept/reject decision taken on a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationAction {
    /// The release note was accepted.
    Accepted,
    /// The release note was rejected.
    Rejected,
}

impl NotificationAction {
    /// Return the action as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for NotificationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("Invalid action: {other}")),
        }
    }
}
