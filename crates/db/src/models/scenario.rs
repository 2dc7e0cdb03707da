//! Scenario catalog entity model.

use carefully_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `scenarios` table.
///
/// Catalog content is seeded by migration and immutable at runtime, so
/// there are no create/update DTOs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scenario {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Prose situation brief fed verbatim to the generation service.
    pub context: String,
    pub category: String,
    /// `beginner`, `intermediate`, or `advanced`.
    pub difficulty: String,
    /// Estimated session length in minutes.
    pub estimated_time: i32,
    pub learning_objectives: Vec<String>,
    pub created_at: Timestamp,
}
