//! Training session entity model (one row per user/scenario pair).

use carefully_core::conversation::TurnRecord;
use carefully_core::error::CoreError;
use carefully_core::scoring::FeedbackRubric;
use carefully_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_scenarios` table.
///
/// `responses` and `feedback` are JSONB arrays; rows only ever grow them
/// (turn appends) or finalize scalar fields (completion). Use [`turns`]
/// and [`rubrics`] for typed access.
///
/// [`turns`]: UserScenario::turns
/// [`rubrics`]: UserScenario::rubrics
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserScenario {
    pub id: DbId,
    pub user_id: DbId,
    pub scenario_id: DbId,
    /// `not_started`, `in_progress`, or `completed`.
    pub status: String,
    /// Derived 0-100 percentage; see `carefully_core::session::progress`.
    pub progress: i32,
    /// Ordered array of [`TurnRecord`] objects.
    pub responses: serde_json::Value,
    /// Ordered array of [`FeedbackRubric`] objects, one per turn.
    pub feedback: serde_json::Value,
    /// Opaque accumulated minutes, self-reported at completion.
    pub total_time: i32,
    /// Finalized 0-100 overall score; meaningful once `status` is
    /// `completed`.
    pub score: i32,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserScenario {
    /// Number of recorded turns.
    pub fn turn_count(&self) -> usize {
        self.responses.as_array().map_or(0, Vec::len)
    }

    /// Decode the stored turn records.
    pub fn turns(&self) -> Result<Vec<TurnRecord>, CoreError> {
        serde_json::from_value(self.responses.clone())
            .map_err(|e| CoreError::Internal(format!("Corrupt responses array: {e}")))
    }

    /// Decode the stored per-turn feedback rubrics.
    pub fn rubrics(&self) -> Result<Vec<FeedbackRubric>, CoreError> {
        serde_json::from_value(self.feedback.clone())
            .map_err(|e| CoreError::Internal(format!("Corrupt feedback array: {e}")))
    }
}
