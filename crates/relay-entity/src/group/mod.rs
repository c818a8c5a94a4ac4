//! Group entities used for bulk fan-out.

pub mod model;

pub use model::{DEFAULT_GROUP_COLOR, Group, GroupMember, GroupSnapshot};
