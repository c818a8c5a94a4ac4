//! Notification domain entities.

pub mod metadata;
pub mod model;
pub mod status;
pub mod view;

pub use metadata::{AuthoredMetadata, ExternalMetadata, NotificationMetadata};
pub use model::{Addressee, Notification, SentVia};
pub use status::{NotificationAction, NotificationStatus};
pub use view::NotificationView;
