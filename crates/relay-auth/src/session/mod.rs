//! Login, logout, and token validation.

pub mod manager;
pub mod revocation;

pub use manager::{LoginResult, SessionManager, SessionUser};
pub use revocation::RevocationList;
