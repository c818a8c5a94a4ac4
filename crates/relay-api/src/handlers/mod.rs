//! Route handlers organized by domain.

pub mod application;
pub mod auth;
pub mod delivery;
pub mod events;
pub mod group;
pub mod health;
pub mod notification;
pub mod recipient;
pub mod tracking;
