//! Events delivered over push channels.

pub mod types;

pub use types::OutboundEvent;
