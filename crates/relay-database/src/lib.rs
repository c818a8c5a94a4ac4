//! # relay-database
//!
//! In-process document store and concrete repository implementations for
//! all relay entities. Each collection hands out ids from its own
//! monotonic sequence and updates a record under that record's entry
//! lock, which is what gives delivery tracking its per-record atomicity.
//!
//! Also provides the JSON seed loader used at startup and in tests.

pub mod repositories;
pub mod seed;
pub mod store;

pub use seed::{SeedData, SeedSummary};
pub use store::{Collection, DocumentStore};
