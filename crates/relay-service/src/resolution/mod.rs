//! Resolution of ids into addressable people and dispatch targets.

pub mod resolver;

pub use resolver::{RecipientResolver, ResolvedAudience};
