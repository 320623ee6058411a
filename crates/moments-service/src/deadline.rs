//! Bounded store calls.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use moments_core::config::SharingConfig;
use moments_core::error::AppError;
use moments_core::result::AppResult;

/// Upper bound applied to every store call made by the services.
#[derive(Debug, Clone, Copy)]
pub struct StoreDeadline {
    limit: Duration,
}

impl StoreDeadline {
    /// Create a deadline of `limit`.
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    /// Create the deadline named by `sharing.store_timeout_seconds`.
    pub fn from_config(config: &SharingConfig) -> Self {
        Self::new(Duration::from_secs(config.store_timeout_seconds))
    }

    /// Await `call`, failing with `StoreUnavailable` once the bound elapses.
    pub async fn run<T, F>(&self, operation: &'static str, call: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        match tokio::time::timeout(self.limit, call).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_ms = self.limit.as_millis() as u64,
                    "Store call timed out"
                );
                Err(AppError::store_unavailable(format!(
                    "Store did not answer '{operation}' in time"
                )))
            }
        }
    }
}

impl Default for StoreDeadline {
    fn default() -> Self {
        Self::from_config(&SharingConfig::default())
    }
}
