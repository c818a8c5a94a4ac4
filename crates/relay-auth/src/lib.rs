//! # relay-auth
//!
//! Session stand-in for the release relay.
//!
//! ## Modules
//!
//! - `jwt`: HS256 session token creation and validation
//! - `password`: Argon2id password hashing
//! - `session`: login/logout flows and the token revocation list

pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
pub use session::{LoginResult, RevocationList, SessionManager, SessionUser};
