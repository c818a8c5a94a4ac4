//! Individual push channel handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::message::types::OutboundEvent;

/// Unique connection identifier
pub type ConnectionId = Uuid;

/// A handle to one live push channel.
///
/// Writes never wait: a full buffer or a closed receiver marks the handle
/// dead and the registry drops it.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Normalized email of the owning user
    pub user_key: String,
    /// Sender for outbound events
    pub sender: mpsc::Sender<OutboundEvent>,
    /// When the channel was opened
    pub connected_at: DateTime<Utc>,
    /// Whether the channel is still writable
    pub alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a handle and the receiver that drains it.
    pub fn channel(
        user_key: impl Into<String>,
        buffer: usize,
    ) -> (Self, mpsc::Receiver<OutboundEvent>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        (Self::new(user_key, sender), receiver)
    }

    /// Create a handle around an existing sender
    pub fn new(user_key: impl Into<String>, sender: mpsc::Sender<OutboundEvent>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_key: user_key.into(),
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Try to write an event without waiting.
    pub fn send(&self, event: OutboundEvent) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(connection_id = %self.id, "Push buffer full, dropping channel");
                self.mark_dead();
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check if the channel is alive
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst) && !self.sender.is_closed()
    }

    /// Mark the channel as dead
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
