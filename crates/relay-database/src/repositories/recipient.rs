//! Recipient repository implementation.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use relay_core::error::AppError;
use relay_core::result::AppResult;
use relay_core::types::{GroupId, RecipientId};
use relay_entity::normalize_email;
use relay_entity::recipient::Recipient;

use crate::store::{Collection, DocumentStore};

/// Repository for direct recipients, with a unique email index.
#[derive(Debug, Clone)]
pub struct RecipientRepository {
    recipients: Arc<Collection<Recipient>>,
    by_email: Arc<DashMap<String, RecipientId>>,
}

impl RecipientRepository {
    /// Create a new recipient repository over the store.
    pub fn new(store: &DocumentStore) -> Self {
        let by_email = DashMap::new();
        for recipient in store.recipients.all() {
            by_email.insert(normalize_email(&recipient.email), recipient.id);
        }
        Self {
            recipients: Arc::clone(&store.recipients),
            by_email: Arc::new(by_email),
        }
    }

    /// Create a recipient. Fails with a conflict if the email is taken.
    pub async fn create(&self, build: impl FnOnce(RecipientId) -> Recipient) -> AppResult<Recipient> {
        let recipient = build(self.recipients.next_id());
        match self.by_email.entry(normalize_email(&recipient.email)) {
            Entry::Occupied(_) => Err(AppError::conflict("Email already exists")),
            Entry::Vacant(slot) => {
                slot.insert(recipient.id);
                self.recipients.insert_existing(recipient.clone());
                Ok(recipient)
            }
        }
    }

    /// Find a recipient by id.
    pub async fn find_by_id(&self, id: RecipientId) -> AppResult<Option<Recipient>> {
        Ok(self.recipients.get(id))
    }

    /// All recipients ordered by id.
    pub async fn find_all(&self) -> AppResult<Vec<Recipient>> {
        Ok(self.recipients.all())
    }

    /// Recipients for the given ids in request order. Unknown and repeated
    /// ids are skipped.
    pub async fn find_many(&self, ids: &[RecipientId]) -> AppResult<Vec<Recipient>> {
        let mut seen = HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.recipients.get(*id))
            .collect())
    }

    /// Replace a recipient, keeping the email index in sync.
    pub async fn update(&self, recipient: &Recipient) -> AppResult<Recipient> {
        let current = self
            .recipients
            .get(recipient.id)
            .ok_or_else(|| AppError::not_found("Recipient not found"))?;

        let old_key = normalize_email(&current.email);
        let new_key = normalize_email(&recipient.email);
        if old_key != new_key {
            match self.by_email.entry(new_key) {
                Entry::Occupied(_) => return Err(AppError::conflict("Email already exists")),
                Entry::Vacant(slot) => {
                    slot.insert(recipient.id);
                }
            }
            self.by_email.remove(&old_key);
        }

        self.recipients.replace(recipient.clone());
        Ok(recipient.clone())
    }

    /// Delete a recipient, returning it if it existed.
    pub async fn delete(&self, id: RecipientId) -> AppResult<Option<Recipient>> {
        let removed = self.recipients.remove(id);
        if let Some(recipient) = &removed {
            self.by_email.remove(&normalize_email(&recipient.email));
        }
        Ok(removed)
    }

    /// Null the group reference on every recipient of `group_id`.
    pub async fn clear_group(&self, group_id: GroupId) -> AppResult<usize> {
        Ok(self.recipients.modify_where(
            |r| r.group_id == Some(group_id),
            |r| {
                r.group_id = None;
                r.updated_at = chrono::Utc::now();
            },
        ))
    }
}
