//! External application registry.

pub mod service;

pub use service::{ApplicationInput, ApplicationPatch, ApplicationService};
