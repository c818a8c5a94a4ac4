//! Notification repository implementation.

use std::sync::Arc;

use relay_core::result::AppResult;
use relay_core::types::{DeliveryId, NotificationId};
use relay_entity::normalize_email;
use relay_entity::notification::Notification;
use relay_entity::tracking::TrackingAggregate;

use crate::store::{Collection, DocumentStore};

/// Repository for notifications.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    notifications: Arc<Collection<Notification>>,
}

impl NotificationRepository {
    /// Create a new notification repository over the store.
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            notifications: Arc::clone(&store.notifications),
        }
    }

    /// Create a notification.
    pub async fn create(
        &self,
        build: impl FnOnce(NotificationId) -> Notification,
    ) -> AppResult<Notification> {
        Ok(self.notifications.insert_with(build))
    }

    /// Find a notification by id regardless of owner.
    pub async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.notifications.get(id))
    }

    /// Find a notification owned by `email`.
    pub async fn find_for_owner(
        &self,
        id: NotificationId,
        email: &str,
    ) -> AppResult<Option<Notification>> {
        Ok(self.notifications.get(id).filter(|n| n.is_owned_by(email)))
    }

    /// Notifications owned by `email`, newest first.
    pub async fn list_for_owner(&self, email: &str) -> AppResult<Vec<Notification>> {
        let email = normalize_email(email);
        let mut owned = self.notifications.filter(|n| n.target_email == email);
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(owned)
    }

    /// Run `f` on the stored notification under its entry lock.
    ///
    /// Returns `None` if the notification does not exist.
    pub fn modify<R>(&self, id: NotificationId, f: impl FnOnce(&mut Notification) -> R) -> Option<R> {
        self.notifications.modify(id, f)
    }

    /// Overwrite the mirrored tracking aggregate with `delivery_id`'s.
    ///
    /// Only the record of the latest bulk send is mirrored; opens on older
    /// records leave the notification alone. Synchronous so it can run
    /// while the caller holds the delivery record's entry lock. Lock order
    /// is always delivery, then notification.
    pub fn mirror_tracking(
        &self,
        id: NotificationId,
        delivery_id: DeliveryId,
        tracking: &TrackingAggregate,
    ) -> bool {
        self.notifications
            .modify(id, |n| {
                let current = n
                    .sent_via
                    .as_ref()
                    .is_some_and(|via| via.delivery_id == delivery_id);
                if current {
                    n.tracking = Some(tracking.clone());
                }
                current
            })
            .unwrap_or(false)
    }
}
