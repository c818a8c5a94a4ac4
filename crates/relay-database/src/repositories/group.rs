//! Group repository implementation.

use std::collections::HashSet;
use std::sync::Arc;

use relay_core::error::AppError;
use relay_core::result::AppResult;
use relay_core::types::GroupId;
use relay_entity::group::Group;

use crate::store::{Collection, DocumentStore};

/// Repository for fan-out groups.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    groups: Arc<Collection<Group>>,
}

impl GroupRepository {
    /// Create a new group repository over the store.
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            groups: Arc::clone(&store.groups),
        }
    }

    /// Create a group.
    pub async fn create(&self, build: impl FnOnce(GroupId) -> Group) -> AppResult<Group> {
        Ok(self.groups.insert_with(build))
    }

    /// Find a group by id.
    pub async fn find_by_id(&self, id: GroupId) -> AppResult<Option<Group>> {
        Ok(self.groups.get(id))
    }

    /// All groups ordered by id.
    pub async fn find_all(&self) -> AppResult<Vec<Group>> {
        Ok(self.groups.all())
    }

    /// Groups for the given ids in request order. Unknown and repeated ids
    /// are skipped.
    pub async fn find_many(&self, ids: &[GroupId]) -> AppResult<Vec<Group>> {
        let mut seen = HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.groups.get(*id))
            .collect())
    }

    /// Replace a group.
    pub async fn update(&self, group: &Group) -> AppResult<Group> {
        if !self.groups.replace(group.clone()) {
            return Err(AppError::not_found("Group not found"));
        }
        Ok(group.clone())
    }

    /// Delete a group, returning it if it existed.
    pub async fn delete(&self, id: GroupId) -> AppResult<Option<Group>> {
        Ok(self.groups.remove(id))
    }
}
