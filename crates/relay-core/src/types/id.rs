//! Newtype wrappers around `i64` for all domain entity identifiers.
//!
//! Every collection hands out identifiers from its own monotonic sequence
//! starting at 1. Using distinct types prevents accidentally passing a
//! `GroupId` where an `ApplicationId` is expected.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around `i64`.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create an identifier from a raw sequence value.
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Return the raw sequence value.
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_id!(
    /// Identifier of a user, either a login account or a member of a group.
    UserId
);

define_id!(
    /// Identifier of an individually addressable recipient.
    RecipientId
);

define_id!(
    /// Identifier of a group.
    GroupId
);

define_id!(
    /// Identifier of an external application.
    ApplicationId
);

define_id!(
    /// Identifier of a notification.
    NotificationId
);

define_id!(
    /// Identifier of a delivery record.
    DeliveryId
);

define_id!(
    /// Identifier of an edit history entry.
    EditHistoryId
);
