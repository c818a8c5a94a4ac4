//! Open-tracking aggregates and reports.

pub mod aggregate;
pub mod report;

pub use aggregate::{OpenedUser, TrackingAggregate, open_rate};
pub use report::{ApplicationBreakdown, TrackingReport};
