//! Application CRUD.

use chrono::Utc;
use tracing::info;

use relay_core::error::AppError;
use relay_core::types::ApplicationId;
use relay_database::repositories::ApplicationRepository;
use relay_entity::application::{Application, ApplicationStatus};

use crate::recipient::service::non_blank;

/// Fields of a new application.
#[derive(Debug, Clone, Default)]
pub struct ApplicationInput {
    pub name: String,
    pub base_url: String,
    pub notification_endpoint: Option<String>,
    pub api_key: Option<String>,
    pub active_users: Option<u64>,
    pub description: Option<String>,
}

/// Changes to an application. Absent fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct ApplicationPatch {
    pub name: Option<String>,
    pub base_url: Option<String>,
    pub notification_endpoint: Option<String>,
    pub api_key: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub active_users: Option<u64>,
    pub description: Option<String>,
}

/// Manages the external applications notifications are dispatched to.
#[derive(Debug, Clone)]
pub struct ApplicationService {
    applications: ApplicationRepository,
}

impl ApplicationService {
    /// Creates a new application service.
    pub fn new(applications: ApplicationRepository) -> Self {
        Self { applications }
    }

    /// All applications.
    pub async fn list(&self) -> Result<Vec<Application>, AppError> {
        self.applications.find_all().await
    }

    /// Registers an application. New applications start `active`.
    pub async fn create(&self, input: ApplicationInput) -> Result<Application, AppError> {
        let name = input.name.trim();
        let base_url = input.base_url.trim();
        if name.is_empty() || base_url.is_empty() {
            return Err(AppError::validation("Name and baseUrl are required"));
        }
        let now = Utc::now();
        let created = self
            .applications
            .create(|id| Application {
                id,
                name: name.to_string(),
                base_url: base_url.to_string(),
                notification_endpoint: input.notification_endpoint.unwrap_or_default(),
                api_key: input.api_key.unwrap_or_default(),
                status: ApplicationStatus::Active,
                active_users: input.active_users.unwrap_or(0),
                description: input.description.unwrap_or_default(),
                created_at: now,
                updated_at: now,
            })
            .await?;
        info!(application_id = %created.id, name = %created.name, "Application registered");
        Ok(created)
    }

    /// Updates an application.
    pub async fn update(
        &self,
        id: ApplicationId,
        patch: ApplicationPatch,
    ) -> Result<Application, AppError> {
        let mut app = self
            .applications
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))?;

        if let Some(name) = non_blank(patch.name) {
            app.name = name;
        }
        if let Some(base_url) = non_blank(patch.base_url) {
            app.base_url = base_url;
        }
        if let Some(endpoint) = patch.notification_endpoint {
            app.notification_endpoint = endpoint;
        }
        if let Some(api_key) = patch.api_key {
            app.api_key = api_key;
        }
        if let Some(status) = patch.status {
            app.status = status;
        }
        if let Some(active_users) = patch.active_users {
            app.active_users = active_users;
        }
        if let Some(description) = patch.description {
            app.description = description;
        }
        app.updated_at = Utc::now();

        let updated = self.applications.update(&app).await?;
        info!(application_id = %id, status = %updated.status, "Application updated");
        Ok(updated)
    }

    /// Removes an application.
    pub async fn delete(&self, id: ApplicationId) -> Result<Application, AppError> {
        let deleted = self
            .applications
            .delete(id)
            .await?
            .ok_or_else(|| AppError::not_found("Application not found"))?;
        info!(application_id = %id, "Application deleted");
        Ok(deleted)
    }
}
