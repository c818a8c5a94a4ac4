//! Application repository implementation.

use std::collections::HashSet;
use std::sync::Arc;

use relay_core::error::AppError;
use relay_core::result::AppResult;
use relay_core::types::ApplicationId;
use relay_entity::application::Application;

use crate::store::{Collection, DocumentStore};

/// Repository for external applications.
#[derive(Debug, Clone)]
pub struct ApplicationRepository {
    applications: Arc<Collection<Application>>,
}

impl ApplicationRepository {
    /// Create a new application repository over the store.
    pub fn new(store: &DocumentStore) -> Self {
        Self {
            applications: Arc::clone(&store.applications),
        }
    }

    /// Register an application.
    pub async fn create(
        &self,
        build: impl FnOnce(ApplicationId) -> Application,
    ) -> AppResult<Application> {
        Ok(self.applications.insert_with(build))
    }

    /// Find an application by id.
    pub async fn find_by_id(&self, id: ApplicationId) -> AppResult<Option<Application>> {
        Ok(self.applications.get(id))
    }

    /// All applications ordered by id.
    pub async fn find_all(&self) -> AppResult<Vec<Application>> {
        Ok(self.applications.all())
    }

    /// Applications for the given ids in request order. Unknown and
    /// repeated ids are skipped.
    pub async fn find_many(&self, ids: &[ApplicationId]) -> AppResult<Vec<Application>> {
        let mut seen = HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| seen.insert(**id))
            .filter_map(|id| self.applications.get(*id))
            .collect())
    }

    /// Replace an application.
    pub async fn update(&self, application: &Application) -> AppResult<Application> {
        if !self.applications.replace(application.clone()) {
            return Err(AppError::not_found("Application not found"));
        }
        Ok(application.clone())
    }

    /// Delete an application, returning it if it existed.
    pub async fn delete(&self, id: ApplicationId) -> AppResult<Option<Application>> {
        Ok(self.applications.remove(id))
    }
}
