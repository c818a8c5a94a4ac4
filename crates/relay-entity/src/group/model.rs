//! Group entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use relay_core::traits::Document;
use relay_core::types::{ApplicationId, GroupId, UserId};

/// Color assigned to groups created without one.
pub const DEFAULT_GROUP_COLOR: &str = "#6c757d";

/// A named population of users entitled to a set of applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Unique group identifier.
    pub id: GroupId,
    /// Group name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Display color (hex).
    pub color: String,
    /// Member users.
    pub users: Vec<GroupMember>,
    /// Applications this group receives notifications through.
    pub application_ids: Vec<ApplicationId>,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
    /// When the group was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Group {
    /// Whether this group grants entitlement to the given application.
    pub fn grants(&self, application_id: ApplicationId) -> bool {
        self.application_ids.contains(&application_id)
    }

    /// Denormalized copy stored in delivery records.
    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            color: self.color.clone(),
            users: self.users.clone(),
            application_ids: self.application_ids.clone(),
        }
    }
}

impl Document for Group {
    type Id = GroupId;

    fn id(&self) -> GroupId {
        self.id
    }
}

/// A user addressed through a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    /// User id, unique across groups.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Group as it was at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    /// Group id.
    pub id: GroupId,
    /// Name at send time.
    pub name: String,
    /// Description at send time.
    pub description: String,
    /// Color at send time.
    pub color: String,
    /// Members at send time.
    pub users: Vec<GroupMember>,
    /// Entitlements at send time.
    pub application_ids: Vec<ApplicationId>,
}

impl GroupSnapshot {
    /// Whether the snapshot lists the user as a member.
    pub fn has_member(&self, user_id: UserId) -> bool {
        self.users.iter().any(|m| m.user_id == user_id)
    }
}
