//! Notification content limits.

use serde::{Deserialize, Serialize};

/// Validation limits applied to authored and ingested notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Maximum title length in characters (after trimming).
    #[serde(default = "default_max_title")]
    pub max_title_chars: usize,
    /// Maximum content size in bytes.
    #[serde(default = "default_max_content")]
    pub max_content_bytes: usize,
    /// Request body cap. Kept above `max_content_bytes` so oversized
    /// content reaches validation instead of being cut off by the server.
    #[serde(default = "default_max_request")]
    pub max_request_bytes: usize,
    /// Content value the rich-text editor emits for an empty document.
    #[serde(default = "default_empty_sentinel")]
    pub empty_content_sentinel: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            max_title_chars: default_max_title(),
            max_content_bytes: default_max_content(),
            max_request_bytes: default_max_request(),
            empty_content_sentinel: default_empty_sentinel(),
        }
    }
}

fn default_max_title() -> usize {
    200
}

fn default_max_content() -> usize {
    10 * 1024 * 1024
}

fn default_max_request() -> usize {
    16 * 1024 * 1024
}

fn default_empty_sentinel() -> String {
    "<p><br></p>".to_string()
}
