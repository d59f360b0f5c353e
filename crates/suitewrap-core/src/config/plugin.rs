//! Plugin system configuration.

use serde::{Deserialize, Serialize};

/// Plugin system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Whether to register the built-in override plugins at startup.
    #[serde(default = "default_true")]
    pub builtins: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            builtins: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}
