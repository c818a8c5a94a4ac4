//! Individually addressed recipient entities.

pub mod model;

pub use model::{Recipient, RecipientSnapshot};
