//! JSON seed fixture loader.
//!
//! The fixture provisions login accounts, recipients, groups, and
//! applications with fixed ids. Collection sequences advance past the
//! seeded ids so later inserts never collide.

use std::path::Path;

use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use relay_core::error::{AppError, ErrorKind};
use relay_core::result::AppResult;
use relay_core::types::{ApplicationId, GroupId, RecipientId};
use relay_entity::application::{Application, ApplicationStatus};
use relay_entity::group::{DEFAULT_GROUP_COLOR, Group, GroupMember};
use relay_entity::normalize_email;
use relay_entity::recipient::Recipient;
use relay_entity::user::User;

use crate::store::DocumentStore;

/// Parsed seed fixture.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    /// Login accounts with plain-text passwords.
    #[serde(default)]
    pub users: Vec<SeedUser>,
    /// Direct recipients.
    #[serde(default)]
    pub recipients: Vec<SeedRecipient>,
    /// Groups.
    #[serde(default)]
    pub groups: Vec<SeedGroup>,
    /// Applications.
    #[serde(default)]
    pub applications: Vec<SeedApplication>,
}

/// A seeded login account.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// A seeded recipient.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecipient {
    pub id: RecipientId,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub group_id: Option<GroupId>,
}

/// A seeded group.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub users: Vec<GroupMember>,
    #[serde(default)]
    pub application_ids: Vec<ApplicationId>,
}

/// A seeded application.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedApplication {
    pub id: ApplicationId,
    pub name: String,
    pub base_url: String,
    #[serde(default)]
    pub notification_endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub description: String,
}

/// Counts of what a seed run inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub recipients: usize,
    pub groups: usize,
    pub applications: usize,
}

impl SeedData {
    /// Parse a fixture from JSON text.
    pub fn from_json(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a fixture file.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Cannot read seed fixture {}", path.display()),
                e,
            )
        })?;
        Self::from_json(&json)
    }

    /// Insert the fixture into the store.
    ///
    /// `hash_password` turns each plain-text password into the stored
    /// credential. Must run before repositories that index the store are
    /// constructed.
    pub fn apply(
        &self,
        store: &DocumentStore,
        hash_password: impl Fn(&str) -> AppResult<String>,
    ) -> AppResult<SeedSummary> {
        let now = Utc::now();

        for user in &self.users {
            let password_hash = hash_password(&user.password)?;
            store.users.insert_with(|id| User {
                id,
                email: normalize_email(&user.email),
                name: user.name.clone(),
                password_hash,
                created_at: now,
            });
        }

        for recipient in &self.recipients {
            store.recipients.insert_existing(Recipient {
                id: recipient.id,
                name: recipient.name.clone(),
                email: normalize_email(&recipient.email),
                role: recipient.role.clone(),
                group_id: recipient.group_id,
                created_at: now,
                updated_at: now,
            });
        }

        for group in &self.groups {
            store.groups.insert_existing(Group {
                id: group.id,
                name: group.name.clone(),
                description: group.description.clone(),
                color: group
                    .color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_GROUP_COLOR.to_string()),
                users: group.users.clone(),
                application_ids: group.application_ids.clone(),
                created_at: now,
                updated_at: now,
            });
        }

        for app in &self.applications {
            store.applications.insert_existing(Application {
                id: app.id,
                name: app.name.clone(),
                base_url: app.base_url.clone(),
                notification_endpoint: app.notification_endpoint.clone(),
                api_key: app.api_key.clone(),
                status: app.status,
                active_users: app.active_users,
                description: app.description.clone(),
                created_at: now,
                updated_at: now,
            });
        }

        let summary = SeedSummary {
            users: self.users.len(),
            recipients: self.recipients.len(),
            groups: self.groups.len(),
            applications: self.applications.len(),
        };
        info!(
            users = summary.users,
            recipients = summary.recipients,
            groups = summary.groups,
            applications = summary.applications,
            "Seed fixture applied"
        );
        Ok(summary)
    }
}
