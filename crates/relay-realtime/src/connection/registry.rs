//! Push channel registry: at most one live channel per user.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use super::handle::{ConnectionHandle, ConnectionId};
use crate::message::types::OutboundEvent;

/// Thread-safe map of user key to that user's live push channel.
///
/// Keys are normalized emails. Every operation is a single-key insert,
/// remove, or lookup; nothing coordinates across keys.
#[derive(Debug, Default)]
pub struct PushChannelRegistry {
    channels: DashMap<String, Arc<ConnectionHandle>>,
}

impl PushChannelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a channel, replacing any prior channel for the same user.
    pub fn register(&self, handle: Arc<ConnectionHandle>) {
        let key = handle.user_key.clone();
        let id = handle.id;
        if let Some(previous) = self.channels.insert(key.clone(), handle) {
            previous.mark_dead();
            debug!(user = %key, replaced = %previous.id, connection_id = %id, "Push channel replaced");
        } else {
            debug!(user = %key, connection_id = %id, "Push channel registered");
        }
    }

    /// Removes the user's channel, whatever it is.
    pub fn unregister(&self, user_key: &str) -> bool {
        let removed = self.channels.remove(user_key).is_some();
        if removed {
            debug!(user = %user_key, "Push channel unregistered");
        }
        removed
    }

    /// Removes the user's channel only if it is still `connection_id`.
    ///
    /// Used when a stream closes so that an old connection going away does
    /// not evict a newer one.
    pub fn release(&self, user_key: &str, connection_id: ConnectionId) -> bool {
        let removed = self
            .channels
            .remove_if(user_key, |_, handle| handle.id == connection_id)
            .is_some();
        if removed {
            debug!(user = %user_key, %connection_id, "Push channel released");
        }
        removed
    }

    /// Delivers an event to one user. Returns whether it was written.
    ///
    /// An absent channel yields `false`. A failed write drops the channel.
    pub fn send(&self, user_key: &str, event: OutboundEvent) -> bool {
        let Some(handle) = self.channels.get(user_key).map(|e| Arc::clone(e.value())) else {
            return false;
        };
        if handle.send(event) {
            return true;
        }
        warn!(user = %user_key, connection_id = %handle.id, "Push failed, dropping channel");
        self.release(user_key, handle.id);
        false
    }

    /// Delivers an event to every channel. Returns the number written.
    ///
    /// Channels that fail are dropped.
    pub fn broadcast(&self, event: &OutboundEvent) -> usize {
        let handles: Vec<Arc<ConnectionHandle>> = self
            .channels
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut delivered = 0;
        for handle in handles {
            if handle.send(event.clone()) {
                delivered += 1;
            } else {
                warn!(user = %handle.user_key, connection_id = %handle.id, "Broadcast failed, dropping channel");
                self.release(&handle.user_key, handle.id);
            }
        }
        delivered
    }

    /// Whether the user has a registered channel.
    pub fn is_connected(&self, user_key: &str) -> bool {
        self.channels.contains_key(user_key)
    }

    /// Number of registered channels.
    pub fn connection_count(&self) -> usize {
        self.channels.len()
    }
}
