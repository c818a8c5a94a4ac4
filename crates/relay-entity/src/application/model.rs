//! Application entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use relay_core::traits::Document;
use relay_core::types::ApplicationId;

use super::status::ApplicationStatus;

/// An external system that receives notifications over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Unique application identifier.
    pub id: ApplicationId,
    /// Application name.
    pub name: String,
    /// Base URL, e.g. `https://crm.example.com`.
    pub base_url: String,
    /// Path appended to the base URL for dispatch, e.g. `/api/notifications`.
    pub notification_endpoint: String,
    /// Bearer credential. Never serialized.
    #[serde(skip_serializing, default)]
    pub api_key: String,
    /// Lifecycle status.
    pub status: ApplicationStatus,
    /// Reported number of active users.
    pub active_users: u64,
    /// Free-text description.
    pub description: String,
    /// When the application was registered.
    pub created_at: DateTime<Utc>,
    /// When the application was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Application {
    /// Full dispatch URL.
    pub fn dispatch_url(&self) -> String {
        format!("{}{}", self.base_url, self.notification_endpoint)
    }

    /// Bearer credential, if one is configured.
    pub fn bearer_token(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }

    /// Denormalized copy stored in delivery records.
    pub fn snapshot(&self) -> ApplicationSnapshot {
        ApplicationSnapshot {
            id: self.id,
            name: self.name.clone(),
            base_url: self.base_url.clone(),
            description: self.description.clone(),
        }
    }
}

impl Document for Application {
    type Id = ApplicationId;

    fn id(&self) -> ApplicationId {
        self.id
    }
}

/// Application as it was at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSnapshot {
    /// Application id.
    pub id: ApplicationId,
    /// Name at send time.
    pub name: String,
    /// Base URL at send time.
    pub base_url: String,
    /// Description at send time.
    pub description: String,
}
