//! Repository for the `user_scenarios` table (training sessions).
//!
//! Sessions have exactly three mutation paths: `start` (upsert into
//! `in_progress`), `append_turn` (one-statement turn append), and
//! `complete` (transactional finalization + user rollup). Everything else
//! is read-only.

use carefully_core::conversation::TurnRecord;
use carefully_core::session::{STATUS_COMPLETED, STATUS_IN_PROGRESS};
use carefully_core::types::DbId;
use sqlx::PgPool;

use crate::models::user_scenario::UserScenario;
use crate::repositories::UserRepo;

/// Column list for `user_scenarios` queries.
const COLUMNS: &str = "id, user_id, scenario_id, status, progress, responses, feedback, \
     total_time, score, completed_at, created_at, updated_at";

/// Provides lifecycle operations for training sessions.
pub struct UserScenarioRepo;

impl UserScenarioRepo {
    /// Find the session for a (user, scenario) pair.
    pub async fn find_by_user_and_scenario(
        pool: &PgPool,
        user_id: DbId,
        scenario_id: DbId,
    ) -> Result<Option<UserScenario>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM user_scenarios WHERE user_id = $1 AND scenario_id = $2");
        sqlx::query_as::<_, UserScenario>(&query)
            .bind(user_id)
            .bind(scenario_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's sessions, most recently touched first.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<UserScenario>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_scenarios \
             WHERE user_id = $1 \
             ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, UserScenario>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Create the session if absent, otherwise force it back to
    /// `in_progress`. Idempotent.
    ///
    /// A completed session is left untouched: the upsert's guard makes the
    /// statement return no row, and the existing row is fetched instead.
    pub async fn start(
        pool: &PgPool,
        user_id: DbId,
        scenario_id: DbId,
    ) -> Result<UserScenario, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_scenarios (user_id, scenario_id, status) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_user_scenarios_user_scenario \
             DO UPDATE SET status = $3, updated_at = now() \
                WHERE user_scenarios.status <> $4 \
             RETURNING {COLUMNS}"
        );
        let started = sqlx::query_as::<_, UserScenario>(&query)
            .bind(user_id)
            .bind(scenario_id)
            .bind(STATUS_IN_PROGRESS)
            .bind(STATUS_COMPLETED)
            .fetch_optional(pool)
            .await?;

        match started {
            Some(session) => Ok(session),
            // Guard fired: the session is already completed.
            None => {
                let existing = Self::find_by_user_and_scenario(pool, user_id, scenario_id).await?;
                existing.ok_or(sqlx::Error::RowNotFound)
            }
        }
    }

    /// Append one turn and its rubric, and set the recomputed progress, in
    /// a single UPDATE.
    ///
    /// Both arrays grow together or not at all, so a failed generation
    /// call upstream can never leave a half-written turn. Returns `None`
    /// if the session does not exist or is not `in_progress`.
    pub async fn append_turn(
        pool: &PgPool,
        session_id: DbId,
        turn: &TurnRecord,
        progress: i32,
    ) -> Result<Option<UserScenario>, sqlx::Error> {
        let turn_json = serde_json::to_value(turn)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
        let rubric_json = serde_json::to_value(&turn.feedback)
            .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        let query = format!(
            "UPDATE user_scenarios SET \
                responses = responses || $2, \
                feedback = feedback || $3, \
                progress = $4, \
                updated_at = now() \
             WHERE id = $1 AND status = $5 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserScenario>(&query)
            .bind(session_id)
            .bind(turn_json)
            .bind(rubric_json)
            .bind(progress)
            .bind(STATUS_IN_PROGRESS)
            .fetch_optional(pool)
            .await
    }

    /// Finalize a session and apply the user rollup in one transaction.
    ///
    /// The `status <> 'completed'` guard makes re-completion a no-op at
    /// the database level, so the rollup counters can never
    /// double-increment. Returns `None` when the guard fired (already
    /// completed) or no such session exists; the caller distinguishes the
    /// two with a follow-up read.
    pub async fn complete(
        pool: &PgPool,
        user_id: DbId,
        scenario_id: DbId,
        score: i32,
        total_time: Option<i32>,
    ) -> Result<Option<UserScenario>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE user_scenarios SET \
                status = $3, \
                progress = 100, \
                score = $4, \
                total_time = COALESCE($5, total_time), \
                completed_at = now(), \
                updated_at = now() \
             WHERE user_id = $1 AND scenario_id = $2 AND status <> $3 \
             RETURNING {COLUMNS}"
        );
        let finalized = sqlx::query_as::<_, UserScenario>(&query)
            .bind(user_id)
            .bind(scenario_id)
            .bind(STATUS_COMPLETED)
            .bind(score)
            .bind(total_time)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(session) = &finalized {
            UserRepo::apply_completion_rollup(&mut *tx, user_id, session.total_time).await?;
        }

        tx.commit().await?;
        Ok(finalized)
    }
}
