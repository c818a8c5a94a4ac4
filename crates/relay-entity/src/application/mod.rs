//! External application entities.

pub mod model;
pub mod status;

pub use model::{Application, ApplicationSnapshot};
pub use status::ApplicationStatus;
