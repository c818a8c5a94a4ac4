//! User repository implementation.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use relay_core::error::AppError;
use relay_core::result::AppResult;
use relay_core::types::UserId;
use relay_entity::normalize_email;
use relay_entity::user::User;

use crate::store::{Collection, DocumentStore};

/// Repository for login accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    users: Arc<Collection<User>>,
    by_email: Arc<DashMap<String, UserId>>,
}

impl UserRepository {
    /// Create a new user repository over the store.
    pub fn new(store: &DocumentStore) -> Self {
        let by_email = DashMap::new();
        for user in store.users.all() {
            by_email.insert(normalize_email(&user.email), user.id);
        }
        Self {
            users: Arc::clone(&store.users),
            by_email: Arc::new(by_email),
        }
    }

    /// Create a user. The email must be unique (case-insensitive).
    pub async fn create(&self, build: impl FnOnce(UserId) -> User) -> AppResult<User> {
        let mut user = build(self.users.next_id());
        user.email = normalize_email(&user.email);
        match self.by_email.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("Email already exists")),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
                self.users.insert_existing(user.clone());
                Ok(user)
            }
        }
    }

    /// Find a user by id.
    pub async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.get(id))
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let id = self.by_email.get(&normalize_email(email)).map(|e| *e.value());
        Ok(id.and_then(|id| self.users.get(id)))
    }

    /// Count users.
    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.users.len() as u64)
    }
}
