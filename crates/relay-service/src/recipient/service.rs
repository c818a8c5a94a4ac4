//! Recipient CRUD.

use chrono::Utc;
use tracing::info;

use relay_core::error::AppError;
use relay_core::types::{GroupId, RecipientId};
use relay_database::repositories::{GroupRepository, RecipientRepository};
use relay_entity::normalize_email;
use relay_entity::recipient::Recipient;

/// Fields of a new recipient.
#[derive(Debug, Clone, Default)]
pub struct RecipientInput {
    pub name: String,
    pub email: String,
    pub role: String,
    pub group_id: Option<GroupId>,
}

/// Changes to a recipient. Empty strings are ignored; `group_id` is
/// `Some(None)` to clear the group.
#[derive(Debug, Clone, Default)]
pub struct RecipientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub group_id: Option<Option<GroupId>>,
}

/// Manages direct recipients.
#[derive(Debug, Clone)]
pub struct RecipientService {
    recipients: RecipientRepository,
    groups: GroupRepository,
}

impl RecipientService {
    /// Creates a new recipient service.
    pub fn new(recipients: RecipientRepository, groups: GroupRepository) -> Self {
        Self { recipients, groups }
    }

    /// All recipients.
    pub async fn list(&self) -> Result<Vec<Recipient>, AppError> {
        self.recipients.find_all().await
    }

    /// Creates a recipient with a unique email.
    pub async fn create(&self, input: RecipientInput) -> Result<Recipient, AppError> {
        let name = input.name.trim();
        let email = normalize_email(&input.email);
        let role = input.role.trim();
        if name.is_empty() || email.is_empty() || role.is_empty() {
            return Err(AppError::validation("Name, email, and role are required"));
        }
        self.check_group(input.group_id).await?;

        let now = Utc::now();
        let created = self
            .recipients
            .create(|id| Recipient {
                id,
                name: name.to_string(),
                email,
                role: role.to_string(),
                group_id: input.group_id,
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!(recipient_id = %created.id, email = %created.email, "Recipient created");
        Ok(created)
    }

    /// Updates a recipient.
    pub async fn update(
        &self,
        id: RecipientId,
        patch: RecipientPatch,
    ) -> Result<Recipient, AppError> {
        let mut recipient = self
            .recipients
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipient not found"))?;

        if let Some(name) = non_blank(patch.name) {
            recipient.name = name;
        }
        if let Some(email) = non_blank(patch.email) {
            recipient.email = normalize_email(&email);
        }
        if let Some(role) = non_blank(patch.role) {
            recipient.role = role;
        }
        if let Some(group_id) = patch.group_id {
            self.check_group(group_id).await?;
            recipient.group_id = group_id;
        }
        recipient.updated_at = Utc::now();

        let updated = self.recipients.update(&recipient).await?;
        info!(recipient_id = %id, "Recipient updated");
        Ok(updated)
    }

    /// Deletes a recipient. Delivery records keep their snapshots.
    pub async fn delete(&self, id: RecipientId) -> Result<Recipient, AppError> {
        let deleted = self
            .recipients
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipient not found"))?;
        info!(recipient_id = %id, "Recipient deleted");
        Ok(deleted)
    }

    async fn check_group(&self, group_id: Option<GroupId>) -> Result<(), AppError> {
        if let Some(group_id) = group_id {
            if self.groups.find_by_id(group_id).await?.is_none() {
                return Err(AppError::validation(format!("Group {group_id} does not exist")));
            }
        }
        Ok(())
    }
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
