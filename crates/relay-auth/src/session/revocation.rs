//! In-memory list of revoked token ids, backed by moka.

use std::time::Duration;

use moka::future::Cache;
use tracing::debug;
use uuid::Uuid;

use relay_core::config::AuthConfig;

/// Remembers logged-out token ids until the tokens would have expired
/// anyway.
#[derive(Debug, Clone)]
pub struct RevocationList {
    revoked: Cache<Uuid, ()>,
}

impl RevocationList {
    /// Create a revocation list sized and timed from configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let revoked = Cache::builder()
            .max_capacity(config.revocation_cache_capacity)
            .time_to_live(Duration::from_secs(config.session_ttl_minutes * 60))
            .build();
        Self { revoked }
    }

    /// Revoke a token id.
    pub async fn revoke(&self, jti: Uuid) {
        self.revoked.insert(jti, ()).await;
        debug!(%jti, "Token revoked");
    }

    /// Whether a token id has been revoked.
    pub async fn is_revoked(&self, jti: Uuid) -> bool {
        self.revoked.contains_key(&jti)
    }
}
