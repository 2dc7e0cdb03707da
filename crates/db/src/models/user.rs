//! User entity model with completion rollup counters.

use carefully_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
///
/// Identity (the `id`) comes from the external identity provider; rows
/// here exist to carry the per-user rollup counters, incremented once per
/// completed session.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub display_name: Option<String>,
    pub role: String,
    /// Number of completed training sessions.
    pub total_scenarios: i32,
    /// Accumulated training minutes across completed sessions.
    pub total_time_minutes: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
