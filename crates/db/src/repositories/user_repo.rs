//! Repository for the `users` table.

use carefully_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::user::User;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, display_name, role, total_scenarios, total_time_minutes, \
     created_at, updated_at";

/// Provides access to user rows and their rollup counters.
pub struct UserRepo;

impl UserRepo {
    /// Make sure a row exists for an externally-issued user id.
    ///
    /// Identity comes from the JWT `sub` claim; the row is created lazily
    /// the first time the user touches a session.
    pub async fn ensure(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply the completion rollup for one finished session.
    ///
    /// Takes a connection rather than the pool so the caller can run it in
    /// the same transaction as the session's completion write.
    pub async fn apply_completion_rollup(
        conn: &mut PgConnection,
        user_id: DbId,
        session_minutes: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET \
                total_scenarios = total_scenarios + 1, \
                total_time_minutes = total_time_minutes + $2, \
                updated_at = now() \
             WHERE id = $1",
        )
        .bind(user_id)
        .bind(session_minutes)
        .execute(conn)
        .await?;
        Ok(())
    }
}
