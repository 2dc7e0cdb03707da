//! Handlers for the training session lifecycle: start, conversation
//! turns, completion, and snapshots for resume.
//!
//! Each mutating handler holds the per-session lock from
//! [`crate::locks::SessionLocks`] across its whole read -> generate ->
//! write sequence, so turns for one session apply in submission order
//! and completion cannot interleave with an in-flight turn.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use carefully_core::conversation::{ConversationTurn, TurnRecord};
use carefully_core::error::CoreError;
use carefully_core::scoring::{session_score, FeedbackRubric};
use carefully_core::session::{
    can_append_turn, is_terminal, progress, target_reached, validate_utterance,
};
use carefully_core::types::DbId;
use carefully_db::models::user_scenario::UserScenario;
use carefully_db::repositories::{ScenarioRepo, UserRepo, UserScenarioRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Instruction standing in for the trainee's first message when asking
/// the model for a scenario-opening line.
const OPENING_LINE_PROMPT: &str =
    "(The trainee has just arrived. Open the scenario with your first line, in character.)";

// ---------------------------------------------------------------------------
// Request / response DTOs
// ---------------------------------------------------------------------------

/// Response for `start`: the session plus a freshly generated opening
/// line. The opening line is never persisted as a turn, and is absent
/// when the session is already completed.
#[derive(Debug, Serialize)]
pub struct StartSessionResponse {
    pub session: UserScenario,
    pub opening_line: Option<String>,
}

/// DTO for submitting one conversation turn.
#[derive(Debug, Deserialize)]
pub struct ConversationRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
}

/// Response for one conversation turn.
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub ai_response: String,
    pub sentiment: String,
    /// False once the conversation should wrap up: either the model
    /// closed it or the session's turn target has been reached.
    pub should_continue: bool,
    pub feedback: FeedbackRubric,
}

/// Optional body for `complete`. `total_time` is the client's
/// self-reported session minutes.
#[derive(Debug, Default, Deserialize)]
pub struct CompleteSessionRequest {
    pub total_time: Option<i32>,
}

// ---------------------------------------------------------------------------
// Lifecycle endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/scenarios/{id}/start
///
/// Create the caller's session for this scenario, or resume it.
/// Idempotent: an in-progress session is forced back to `in_progress`
/// with its history intact; a completed session is returned read-only
/// with no opening line and no generation call.
pub async fn start_session(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(scenario_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let scenario = ScenarioRepo::find_by_id(&state.pool, scenario_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Scenario",
            id: scenario_id,
        })?;

    let _guard = state.session_locks.acquire(user.user_id, scenario_id).await;

    let existing =
        UserScenarioRepo::find_by_user_and_scenario(&state.pool, user.user_id, scenario_id).await?;
    if let Some(session) = existing.filter(|s| is_terminal(&s.status)) {
        return Ok(Json(DataResponse {
            data: StartSessionResponse {
                session,
                opening_line: None,
            },
        }));
    }

    // Generate the opening line before touching the session so a failed
    // generation call leaves no state behind.
    let opening = state
        .model
        .generate_reply(&scenario.context, &[], OPENING_LINE_PROMPT)
        .await?;

    UserRepo::ensure(&state.pool, user.user_id).await?;
    let session = UserScenarioRepo::start(&state.pool, user.user_id, scenario_id).await?;

    tracing::info!(
        user_id = user.user_id,
        scenario_id,
        session_id = session.id,
        "Training session started",
    );

    Ok(Json(DataResponse {
        data: StartSessionResponse {
            session,
            opening_line: Some(opening.message),
        },
    }))
}

/// POST /api/v1/scenarios/{id}/conversation
///
/// Submit one trainee utterance: generate the character's reply and the
/// feedback rubric, then append both to the session as a single turn.
///
/// The turn is appended only after both generation calls succeed, in one
/// UPDATE, so a failure leaves the session exactly as it was and the
/// client can resubmit the same utterance.
pub async fn submit_turn(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(scenario_id): Path<DbId>,
    Json(input): Json<ConversationRequest>,
) -> AppResult<impl IntoResponse> {
    let message = validate_utterance(&input.message)?.to_string();

    let scenario = ScenarioRepo::find_by_id(&state.pool, scenario_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Scenario",
            id: scenario_id,
        })?;

    let _guard = state.session_locks.acquire(user.user_id, scenario_id).await;

    let session =
        UserScenarioRepo::find_by_user_and_scenario(&state.pool, user.user_id, scenario_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Session",
                id: scenario_id,
            })?;

    if !can_append_turn(&session.status) {
        return Err(CoreError::Conflict(format!(
            "Session is {} and accepts no further turns",
            session.status
        ))
        .into());
    }

    let reply = state
        .model
        .generate_reply(&scenario.context, &input.conversation_history, &message)
        .await?;
    let rubric = state
        .model
        .generate_feedback(&scenario.context, &input.conversation_history, &message)
        .await?;

    let turn = TurnRecord {
        user_response: message,
        ai_response: reply.message.clone(),
        sentiment: reply.sentiment.clone(),
        feedback: rubric.clone(),
        timestamp: chrono::Utc::now(),
    };

    let turn_target = state.config.session_turn_target;
    let new_progress = progress(session.turn_count() + 1, turn_target);

    let updated = UserScenarioRepo::append_turn(&state.pool, session.id, &turn, new_progress)
        .await?
        .ok_or_else(|| {
            CoreError::Conflict("Session was finalized while the turn was being generated".into())
        })?;

    tracing::info!(
        user_id = user.user_id,
        scenario_id,
        turn_count = updated.turn_count(),
        progress = updated.progress,
        sentiment = %reply.sentiment,
        "Turn recorded",
    );

    let should_continue =
        reply.should_continue && !target_reached(updated.turn_count(), turn_target);

    Ok(Json(DataResponse {
        data: ConversationResponse {
            ai_response: reply.message,
            sentiment: reply.sentiment,
            should_continue,
            feedback: rubric,
        },
    }))
}

/// POST /api/v1/scenarios/{id}/complete
///
/// Finalize the caller's session: compute the overall score from the
/// stored per-turn rubrics and apply the user rollup, in one
/// transaction. Completing an already-completed session is a no-op that
/// returns the stored row unchanged.
///
/// Reaching the turn target is deliberately not a precondition; the UI
/// offers an early exit.
pub async fn complete_session(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(scenario_id): Path<DbId>,
    body: Option<Json<CompleteSessionRequest>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|Json(b)| b).unwrap_or_default();

    let _guard = state.session_locks.acquire(user.user_id, scenario_id).await;

    let session =
        UserScenarioRepo::find_by_user_and_scenario(&state.pool, user.user_id, scenario_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Session",
                id: scenario_id,
            })?;

    if is_terminal(&session.status) {
        return Ok(Json(DataResponse { data: session }));
    }

    // Score is recomputed from stored feedback alone, so it stays
    // auditable after the fact.
    let score = session_score(&session.rubrics()?);

    let finalized =
        UserScenarioRepo::complete(&state.pool, user.user_id, scenario_id, score, input.total_time)
            .await?;

    match finalized {
        Some(finalized) => {
            tracing::info!(
                user_id = user.user_id,
                scenario_id,
                session_id = finalized.id,
                score = finalized.score,
                "Training session completed",
            );
            Ok(Json(DataResponse { data: finalized }))
        }
        // The database guard fired: someone else completed it first.
        // Return the stored row; the rollup was applied exactly once.
        None => {
            let current =
                UserScenarioRepo::find_by_user_and_scenario(&state.pool, user.user_id, scenario_id)
                    .await?
                    .ok_or(CoreError::NotFound {
                        entity: "Session",
                        id: scenario_id,
                    })?;
            Ok(Json(DataResponse { data: current }))
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot endpoints
// ---------------------------------------------------------------------------

/// GET /api/v1/user/scenarios
///
/// List the caller's sessions, most recently touched first.
pub async fn list_user_sessions(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let sessions = UserScenarioRepo::list_by_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// GET /api/v1/user/scenarios/{scenario_id}
///
/// Current session snapshot for resume. 404 if the caller never started
/// this scenario.
pub async fn get_user_session(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(scenario_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session =
        UserScenarioRepo::find_by_user_and_scenario(&state.pool, user.user_id, scenario_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Session",
                id: scenario_id,
            })?;
    Ok(Json(DataResponse { data: session }))
}
