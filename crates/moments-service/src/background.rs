//! Fire-and-forget store writes.
//!
//! Share grants are a secondary index. Writing or deleting them never
//! blocks or fails the request that triggered it.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use moments_core::result::AppResult;
use moments_core::types::RouteId;

use crate::deadline::StoreDeadline;

/// Spawns best-effort store writes and keeps their handles so shutdown can
/// wait for them.
#[derive(Debug, Clone, Default)]
pub struct BackgroundWrites {
    deadline: StoreDeadline,
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl BackgroundWrites {
    /// Create a writer whose tasks are bounded by `deadline`.
    pub fn new(deadline: StoreDeadline) -> Self {
        Self {
            deadline,
            pending: Arc::default(),
        }
    }

    /// Run `call` on the runtime. Failures are logged against `route_id`.
    pub fn spawn<T, F>(&self, operation: &'static str, route_id: RouteId, call: F)
    where
        F: Future<Output = AppResult<T>> + Send + 'static,
        T: Send + 'static,
    {
        let deadline = self.deadline;
        let handle = tokio::spawn(async move {
            match deadline.run(operation, call).await {
                Ok(_) => debug!(operation, route_id = %route_id, "Background store write done"),
                Err(e) => warn!(
                    operation,
                    route_id = %route_id,
                    error = %e,
                    "Background store write failed"
                ),
            }
        });

        let mut pending = self.lock();
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }

    /// Wait for every write spawned so far.
    pub async fn flush(&self) {
        let handles = std::mem::take(&mut *self.lock());
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Background store write panicked");
            }
        }
    }

    /// Number of writes that have not finished yet.
    pub fn in_flight(&self) -> usize {
        self.lock().iter().filter(|h| !h.is_finished()).count()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
