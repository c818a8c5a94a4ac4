//! Open tracking: ingestion of open callbacks and reporting.

pub mod service;

pub use service::{OpenEvent, OpenRecorded, TrackingService};
