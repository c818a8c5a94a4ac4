//! Push channel handles and the per-user registry.

pub mod handle;
pub mod registry;

pub use handle::{ConnectionHandle, ConnectionId};
pub use registry::PushChannelRegistry;
