//! Notification lifecycle: authoring, ingestion, edits, and sends.

pub mod input;
pub mod rules;
pub mod service;

pub use input::{
    BulkSendOutcome, BulkSendSummary, CreateOutcome, GroupSummary, IncomingWebhook,
    NewNotification, NotificationUpdate,
};
pub use rules::NotificationRules;
pub use service::NotificationService;
