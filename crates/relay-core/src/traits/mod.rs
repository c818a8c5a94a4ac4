//! Core traits defined in `relay-core` and implemented by other crates.

pub mod document;

pub use document::Document;
