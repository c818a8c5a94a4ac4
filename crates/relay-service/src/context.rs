//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use relay_entity::normalize_email;

/// Context for the current authenticated request.
///
/// Extracted by the API layer and passed into service methods so that
/// every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's normalized email.
    pub email: String,
    /// The user's display name.
    pub name: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(email: &str, name: impl Into<String>) -> Self {
        Self {
            email: normalize_email(email),
            name: name.into(),
            request_time: Utc::now(),
        }
    }
}
