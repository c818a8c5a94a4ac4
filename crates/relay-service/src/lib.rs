//! # relay-service
//!
//! Business logic service layer for the release relay. Each service
//! orchestrates repositories, the push channel registry, and the dispatch
//! transport to implement one use case family.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time and are cheap to clone.

pub mod application;
pub mod context;
pub mod dispatch;
pub mod group;
pub mod notification;
pub mod recipient;
pub mod resolution;
pub mod tracking;

pub use application::ApplicationService;
pub use context::RequestContext;
pub use dispatch::{DispatchEngine, DispatchOutcome, DispatchTransport, HttpTransport};
pub use group::GroupService;
pub use notification::{NotificationRules, NotificationService};
pub use recipient::RecipientService;
pub use resolution::RecipientResolver;
pub use tracking::TrackingService;
