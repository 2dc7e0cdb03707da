use std::sync::Arc;

use carefully_llm::DialogueModel;

use crate::config::ServerConfig;
use crate::locks::SessionLocks;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: carefully_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Generation service; a trait object so tests plug in a
    /// deterministic implementation.
    pub model: Arc<dyn DialogueModel>,
    /// Per-session mutexes serializing session read-modify-writes.
    pub session_locks: Arc<SessionLocks>,
}
