//! # relay-entity
//!
//! Domain entity models for the release relay. Every struct in this crate
//! is either a stored document (users, recipients, groups, applications,
//! notifications, delivery records, edit history) or a value object
//! embedded in one (snapshots, dispatch results, tracking aggregates).
//!
//! Entities serialize with camelCase field names, which is the shape the
//! HTTP surface and external applications exchange.

pub mod application;
pub mod delivery;
pub mod group;
pub mod history;
pub mod notification;
pub mod recipient;
pub mod tracking;
pub mod user;

/// Normalizes an email for lookups and channel keys: trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
