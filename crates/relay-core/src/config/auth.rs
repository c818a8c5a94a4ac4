//! Session token configuration.

use serde::{Deserialize, Serialize};

/// Authentication and session token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token TTL in minutes.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u64,
    /// Maximum number of revoked token ids remembered at once.
    #[serde(default = "default_revocation_capacity")]
    pub revocation_cache_capacity: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_minutes: default_session_ttl(),
            revocation_cache_capacity: default_revocation_capacity(),
        }
    }
}

fn default_jwt_secret() -> String {
    "change-me-in-production".to_string()
}

fn default_session_ttl() -> u64 {
    24 * 60
}

fn default_revocation_capacity() -> u64 {
    10_000
}
