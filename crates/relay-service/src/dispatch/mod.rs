//! Fan-out of one notification to external applications.

pub mod engine;
pub mod payload;
pub mod transport;

pub use engine::{DispatchEngine, DispatchOutcome};
pub use payload::{DispatchMetadata, DispatchPayload};
pub use transport::{
    DispatchTarget, DispatchTransport, HttpTransport, TransportError, TransportResponse,
};
