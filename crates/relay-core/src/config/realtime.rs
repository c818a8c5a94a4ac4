//! Push channel configuration.

use serde::{Deserialize, Serialize};

/// Live event channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Per-connection outbound buffer. A channel whose buffer is full is
    /// treated as disconnected.
    #[serde(default = "default_channel_buffer")]
    pub channel_buffer_size: usize,
    /// Interval between SSE keep-alive comments in seconds.
    #[serde(default = "default_keep_alive")]
    pub keep_alive_seconds: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_buffer_size: default_channel_buffer(),
            keep_alive_seconds: default_keep_alive(),
        }
    }
}

fn default_channel_buffer() -> usize {
    64
}

fn default_keep_alive() -> u64 {
    15
}
