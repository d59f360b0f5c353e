//! In-memory runner configuration.

use serde::{Deserialize, Serialize};

/// Settings applied when the in-memory runner executes a suite tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Stop scheduling tests after the first failure.
    #[serde(default)]
    pub bail: bool,
}
