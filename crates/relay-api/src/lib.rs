//! # relay-api
//!
//! HTTP API layer for the release relay built on Axum.
//!
//! Provides the REST endpoints, the server-sent event stream, middleware
//! (CORS, request logging), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use error::ApiError;
pub use state::AppState;
