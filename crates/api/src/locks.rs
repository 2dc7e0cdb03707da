//! Per-session lock registry.
//!
//! Each turn's prompt depends on the full prior history, so turns within
//! one session must apply in submission order. Handlers acquire the
//! session's lock around their whole read -> generate -> write sequence;
//! requests for different sessions proceed in parallel.

use std::collections::HashMap;
use std::sync::Arc;

use carefully_core::types::DbId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per (user, scenario) pair.
///
/// Entries are created on first touch and kept for the life of the
/// process; the map is bounded by the number of distinct sessions seen
/// since startup.
#[derive(Default)]
pub struct SessionLocks {
    inner: Mutex<HashMap<(DbId, DbId), Arc<Mutex<()>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one session, waiting if another request for
    /// the same session holds it.
    ///
    /// The registry mutex is only held long enough to fetch or insert the
    /// per-session entry; the returned guard is the session lock itself.
    pub async fn acquire(&self, user_id: DbId, scenario_id: DbId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.inner.lock().await;
            Arc::clone(registry.entry((user_id, scenario_id)).or_default())
        };
        lock.lock_owned().await
    }
}
