//! Session lifecycle manager: login, logout and token validation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use relay_core::config::AuthConfig;
use relay_core::error::AppError;
use relay_database::repositories::UserRepository;
use relay_entity::normalize_email;

use crate::jwt::{Claims, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

use super::revocation::RevocationList;

/// The authenticated user as seen by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    /// Normalized email.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    /// Signed session token.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: SessionUser,
}

/// Manages the session lifecycle.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// JWT encoder for token generation.
    jwt_encoder: Arc<JwtEncoder>,
    /// JWT decoder for token validation.
    jwt_decoder: Arc<JwtDecoder>,
    /// Revoked token ids.
    revocations: RevocationList,
    /// User repository.
    user_repo: UserRepository,
    /// Password hasher.
    password_hasher: PasswordHasher,
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(config: &AuthConfig, user_repo: UserRepository) -> Self {
        Self {
            jwt_encoder: Arc::new(JwtEncoder::new(config)),
            jwt_decoder: Arc::new(JwtDecoder::new(config)),
            revocations: RevocationList::new(config),
            user_repo,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Checks credentials and issues a session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            warn!(user = %email, "Login failed: unknown user");
            return Err(AppError::authentication("Invalid credentials"));
        };

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            warn!(user = %email, "Login failed: bad password");
            return Err(AppError::authentication("Invalid credentials"));
        }

        let issued = self.jwt_encoder.issue(&user.email, &user.name)?;
        info!(user = %user.email, "Login successful");

        Ok(LoginResult {
            expires_at: issued.expires_at(),
            token: issued.token,
            user: SessionUser {
                email: user.email,
                name: user.name,
            },
        })
    }

    /// Validates a token and returns its claims.
    pub async fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.jwt_decoder.decode(token)?;
        if self.revocations.is_revoked(claims.jti).await {
            return Err(AppError::authentication("Token has been revoked"));
        }
        Ok(claims)
    }

    /// Revokes the token the claims came from.
    pub async fn logout(&self, claims: &Claims) -> Result<(), AppError> {
        self.revocations.revoke(claims.jti).await;
        info!(user = %claims.email(), "Logout");
        Ok(())
    }

    /// Hashes a password for provisioning.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        self.password_hasher.hash_password(password)
    }
}
