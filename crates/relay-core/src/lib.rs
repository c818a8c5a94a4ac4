//! # relay-core
//!
//! Core crate for the release relay. Contains configuration schemas,
//! typed identifiers, the document trait implemented by every stored
//! entity, and the unified error system.
//!
//! This crate has **no** internal dependencies on other relay crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
