//! Session lifecycle rules: status constants, transition checks, progress
//! computation, and utterance validation.
//!
//! A session moves `not_started -> in_progress -> completed`; `completed`
//! is terminal. Progress is derived from the number of recorded turns
//! against a configurable per-session turn target.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Session has been created but the user has not begun the roleplay.
pub const STATUS_NOT_STARTED: &str = "not_started";
/// Session is underway; turns may be appended.
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// Session has been finalized and scored. Terminal.
pub const STATUS_COMPLETED: &str = "completed";

/// All valid session statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_NOT_STARTED, STATUS_IN_PROGRESS, STATUS_COMPLETED];

/// Default number of turns that make up a full session.
pub const DEFAULT_TURN_TARGET: u32 = 3;

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Returns `true` if the status admits no further transitions.
pub fn is_terminal(status: &str) -> bool {
    status == STATUS_COMPLETED
}

/// Validate that a status string is one of the known statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown session status: '{status}'. Valid statuses: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Whether a `start` call may (re-)enter `in_progress` from `status`.
///
/// Starting is idempotent for `not_started` and `in_progress` sessions.
/// A completed session is returned read-only instead of being restarted,
/// so `start` is not a valid transition out of it.
pub fn can_start(status: &str) -> bool {
    status == STATUS_NOT_STARTED || status == STATUS_IN_PROGRESS
}

/// Whether turns may be appended in `status`.
pub fn can_append_turn(status: &str) -> bool {
    status == STATUS_IN_PROGRESS
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Derived progress percentage for a session with `turn_count` recorded
/// turns out of a `turn_target`-turn session.
///
/// `min(round(turn_count / turn_target * 100), 100)`, so with the default
/// target of 3 the sequence is 0, 33, 67, 100, 100, ...
pub fn progress(turn_count: usize, turn_target: u32) -> i32 {
    if turn_target == 0 {
        return 100;
    }
    let pct = (turn_count as f64 / turn_target as f64 * 100.0).round() as i64;
    pct.min(100) as i32
}

/// Whether the turn target has been reached and the caller should stop
/// offering further turns.
pub fn target_reached(turn_count: usize, turn_target: u32) -> bool {
    turn_count >= turn_target as usize
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

/// Validate a user utterance, returning the trimmed text.
///
/// Rejects input that is empty after trimming.
pub fn validate_utterance(message: &str) -> Result<&str, CoreError> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Message must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
