//! Core type definitions used across the relay workspace.

pub mod id;

pub use id::*;
