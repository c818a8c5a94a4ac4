//! Delivery record repository implementation.

use std::sync::Arc;

use relay_core::error::AppError;
use relay_core::result::AppResult;
use relay_core::types::{DeliveryId, NotificationId};
use relay_entity::delivery::DeliveryRecord;
use relay_entity::tracking::TrackingAggregate;

use crate::store::{Collection, DocumentStore};

/// Repository for delivery records.
///
/// Records are immutable after creation except for their tracking
/// aggregate, which only changes through [`DeliveryRepository::update_tracking`].
#[derive(Debug, Clone)]
pub struct DeliveryRepository {
    deliveries: Arc<Collection<DeliveryRecord>>,
}

impl DeliveryRepository {
    /// Create a new delivery repository over the store.
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            deliveries: Arc::clone(&store.deliveries),
        }
    }

    /// Create a delivery record.
    pub async fn create(
        &self,
        build: impl FnOnce(DeliveryId) -> DeliveryRecord,
    ) -> AppResult<DeliveryRecord> {
        Ok(self.deliveries.insert_with(build))
    }

    /// Find a record by id.
    pub async fn find_by_id(&self, id: DeliveryId) -> AppResult<Option<DeliveryRecord>> {
        Ok(self.deliveries.get(id))
    }

    /// Most recent record of a notification that tracks opens.
    pub async fn find_latest_tracked(
        &self,
        notification_id: NotificationId,
    ) -> AppResult<Option<DeliveryRecord>> {
        Ok(self
            .deliveries
            .filter(|d| d.notification_id == notification_id && d.tracking.is_some())
            .pop())
    }

    /// Read-modify-write of one record's tracking aggregate.
    ///
    /// `f` runs while the record's entry lock is held, so concurrent calls
    /// for the same record are serialized and calls for different records
    /// proceed in parallel. Fails if the record does not exist or does not
    /// track opens.
    pub fn update_tracking<R>(
        &self,
        id: DeliveryId,
        f: impl FnOnce(NotificationId, &mut TrackingAggregate) -> R,
    ) -> AppResult<R> {
        self.deliveries
            .modify(id, |record| {
                let notification_id = record.notification_id;
                record
                    .tracking
                    .as_mut()
                    .map(|tracking| f(notification_id, tracking))
            })
            .ok_or_else(|| AppError::not_found("Sent release record not found"))?
            .ok_or_else(|| AppError::validation("Open tracking is not enabled for this delivery"))
    }
}
