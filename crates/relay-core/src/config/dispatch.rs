//! Outbound dispatch configuration.

use serde::{Deserialize, Serialize};

/// Settings for requests sent to external applications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Per-target request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// User-Agent header sent with every dispatch.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Marker header identifying relay traffic to receivers.
    #[serde(default = "default_source_header")]
    pub source_header: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            source_header: default_source_header(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("release-relay/{}", env!("CARGO_PKG_VERSION"))
}

fn default_source_header() -> String {
    "X-PM-Interface-Source".to_string()
}
