//! Recipient management.

pub mod service;

pub use service::{RecipientInput, RecipientPatch, RecipientService};
