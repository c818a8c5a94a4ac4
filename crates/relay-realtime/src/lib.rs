//! # relay-realtime
//!
//! Push channel registry for the release relay. Each authenticated user
//! holds at most one live outbound channel; write paths push events to it
//! after their changes are committed.
//!
//! The registry only deals in bounded `mpsc` senders. The HTTP layer owns
//! the receiving side and turns it into a server-sent event stream.

pub mod connection;
pub mod message;

pub use connection::{ConnectionHandle, ConnectionId, PushChannelRegistry};
pub use message::OutboundEvent;
