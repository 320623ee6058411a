//! Route sharing configuration.

use serde::{Deserialize, Serialize};

/// Settings for share tokens and the store calls behind them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Upper bound on a single store call, in seconds.
    #[serde(default = "default_store_timeout")]
    pub store_timeout_seconds: u64,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            store_timeout_seconds: default_store_timeout(),
        }
    }
}

fn default_store_timeout() -> u64 {
    5
}
