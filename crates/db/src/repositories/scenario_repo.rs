//! Repository for the `scenarios` catalog table. Read-only.

use carefully_core::types::DbId;
use sqlx::PgPool;

use crate::models::scenario::Scenario;

/// Column list for `scenarios` queries.
const COLUMNS: &str = "id, title, description, context, category, difficulty, \
     estimated_time, learning_objectives, created_at";

/// Read-only access to the scenario catalog.
pub struct ScenarioRepo;

impl ScenarioRepo {
    /// List all scenarios, easiest first, then by id for a stable order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Scenario>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenarios \
             ORDER BY CASE difficulty \
                 WHEN 'beginner' THEN 0 \
                 WHEN 'intermediate' THEN 1 \
                 ELSE 2 END, id"
        );
        sqlx::query_as::<_, Scenario>(&query).fetch_all(pool).await
    }

    /// Find a scenario by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Scenario>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenarios WHERE id = $1");
        sqlx::query_as::<_, Scenario>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
