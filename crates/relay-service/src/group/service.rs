//! Group CRUD.

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use relay_core::error::AppError;
use relay_core::types::{ApplicationId, GroupId};
use relay_database::repositories::{ApplicationRepository, GroupRepository, RecipientRepository};
use relay_entity::delivery::NamedRef;
use relay_entity::group::{DEFAULT_GROUP_COLOR, Group, GroupMember};

use crate::recipient::service::non_blank;

/// Fields of a new group.
#[derive(Debug, Clone, Default)]
pub struct GroupInput {
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub users: Vec<GroupMember>,
    pub application_ids: Vec<ApplicationId>,
}

/// Changes to a group. Absent fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub users: Option<Vec<GroupMember>>,
    pub application_ids: Option<Vec<ApplicationId>>,
}

/// A group with the counts shown in listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupListing {
    #[serde(flatten)]
    pub group: Group,
    pub user_count: usize,
    /// Entitled applications that still exist.
    pub applications: Vec<NamedRef<ApplicationId>>,
}

/// Manages fan-out groups.
#[derive(Debug, Clone)]
pub struct GroupService {
    groups: GroupRepository,
    recipients: RecipientRepository,
    applications: ApplicationRepository,
}

impl GroupService {
    /// Creates a new group service.
    pub fn new(
        groups: GroupRepository,
        recipients: RecipientRepository,
        applications: ApplicationRepository,
    ) -> Self {
        Self {
            groups,
            recipients,
            applications,
        }
    }

    /// All groups with member counts and entitled applications.
    pub async fn list(&self) -> Result<Vec<GroupListing>, AppError> {
        let applications = self.applications.find_all().await?;
        let groups = self.groups.find_all().await?;
        Ok(groups
            .into_iter()
            .map(|group| GroupListing {
                user_count: group.users.len(),
                applications: applications
                    .iter()
                    .filter(|app| group.grants(app.id))
                    .map(|app| NamedRef::new(app.id, &app.name))
                    .collect(),
                group,
            })
            .collect())
    }

    /// Creates a group.
    pub async fn create(&self, input: GroupInput) -> Result<Group, AppError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Group name is required"));
        }
        let now = Utc::now();
        let created = self
            .groups
            .create(|id| Group {
                id,
                name: name.to_string(),
                description: input.description.unwrap_or_default(),
                color: non_blank(input.color).unwrap_or_else(|| DEFAULT_GROUP_COLOR.to_string()),
                users: input.users,
                application_ids: input.application_ids,
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!(group_id = %created.id, name = %created.name, "Group created");
        Ok(created)
    }

    /// Updates a group. Existing delivery records keep their snapshots.
    pub async fn update(&self, id: GroupId, patch: GroupPatch) -> Result<Group, AppError> {
        let mut group = self
            .groups
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Group not found"))?;

        if let Some(name) = non_blank(patch.name) {
            group.name = name;
        }
        if let Some(description) = patch.description {
            group.description = description;
        }
        if let Some(color) = non_blank(patch.color) {
            group.color = color;
        }
        if let Some(users) = patch.users {
            group.users = users;
        }
        if let Some(application_ids) = patch.application_ids {
            group.application_ids = application_ids;
        }
        group.updated_at = Utc::now();

        let updated = self.groups.update(&group).await?;
        info!(group_id = %id, "Group updated");
        Ok(updated)
    }

    /// Deletes a group and clears it from recipients that point to it.
    pub async fn delete(&self, id: GroupId) -> Result<Group, AppError> {
        let deleted = self
            .groups
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("Group not found"))?;
        let cleared = self.recipients.clear_group(id).await?;
        info!(group_id = %id, recipients_cleared = cleared, "Group deleted");
        Ok(deleted)
    }
}
