//! Delivery records: one per fan-out event.

pub mod dispatch;
pub mod record;

use serde::{Deserialize, Serialize};

pub use dispatch::DispatchResult;
pub use record::{DeliveryRecord, DeliveryScope};

/// An id paired with the display name it had at the time of reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef<Id> {
    /// Referenced id.
    pub id: Id,
    /// Name at the time of reference.
    pub name: String,
}

impl<Id> NamedRef<Id> {
    /// Creates a reference.
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
