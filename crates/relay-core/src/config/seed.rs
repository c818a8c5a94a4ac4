//! Seed fixture configuration.

use serde::{Deserialize, Serialize};

/// Where to load initial users, recipients, groups, and applications from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Whether to load the fixture at startup.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Path to the JSON fixture.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            path: default_path(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "config/seed.json".to_string()
}
