//! Group management.

pub mod service;

pub use service::{GroupInput, GroupListing, GroupPatch, GroupService};
