//! Recipient, group-user, and application resolution.

use std::collections::HashMap;

use relay_core::result::AppResult;
use relay_core::types::{ApplicationId, GroupId, RecipientId, UserId};
use relay_database::repositories::{ApplicationRepository, GroupRepository, RecipientRepository};
use relay_entity::application::Application;
use relay_entity::group::{Group, GroupMember};
use relay_entity::recipient::Recipient;

/// Users addressed through a set of groups.
#[derive(Debug, Clone)]
pub struct ResolvedAudience {
    /// Groups that matched, in request order.
    pub groups: Vec<Group>,
    /// Union of their members, one entry per user id.
    pub users: Vec<GroupMember>,
}

impl ResolvedAudience {
    /// Whether no users were found.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Turns ids from a send request into stored entities.
///
/// Unknown ids are dropped silently. Callers decide whether an empty
/// result is an error.
#[derive(Debug, Clone)]
pub struct RecipientResolver {
    recipients: RecipientRepository,
    groups: GroupRepository,
    applications: ApplicationRepository,
}

impl RecipientResolver {
    /// Creates a new resolver.
    pub fn new(
        recipients: RecipientRepository,
        groups: GroupRepository,
        applications: ApplicationRepository,
    ) -> Self {
        Self {
            recipients,
            groups,
            applications,
        }
    }

    /// Recipients for the given ids.
    pub async fn resolve_recipients(&self, ids: &[RecipientId]) -> AppResult<Vec<Recipient>> {
        self.recipients.find_many(ids).await
    }

    /// Groups for the given ids and the deduplicated union of their users.
    ///
    /// A user listed in several groups appears once, at the position of
    /// its first occurrence, carrying the name and email of its last
    /// occurrence.
    pub async fn resolve_group_users(&self, ids: &[GroupId]) -> AppResult<ResolvedAudience> {
        let groups = self.groups.find_many(ids).await?;
        Ok(ResolvedAudience {
            users: union_members(&groups),
            groups,
        })
    }

    /// Applications for the given ids.
    pub async fn resolve_applications(
        &self,
        ids: &[ApplicationId],
    ) -> AppResult<Vec<Application>> {
        self.applications.find_many(ids).await
    }
}

fn union_members(groups: &[Group]) -> Vec<GroupMember> {
    let mut position: HashMap<UserId, usize> = HashMap::new();
    let mut users: Vec<GroupMember> = Vec::new();
    for member in groups.iter().flat_map(|g| g.users.iter()) {
        match position.get(&member.user_id) {
            Some(&index) => users[index] = member.clone(),
            None => {
                position.insert(member.user_id, users.len());
                users.push(member.clone());
            }
        }
    }
    users
}
