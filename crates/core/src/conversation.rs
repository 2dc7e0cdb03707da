//! Conversation history and turn record types.

use serde::{Deserialize, Serialize};

use crate::scoring::FeedbackRubric;
use crate::types::Timestamp;

/// Speaker role for the trainee's lines in a conversation history.
pub const ROLE_USER: &str = "user";
/// Speaker role for the roleplayed character's lines.
pub const ROLE_CHARACTER: &str = "character";

/// One prior exchange line, as submitted by the client with each turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// `user` or `character`.
    pub role: String,
    pub message: String,
}

/// One completed turn as persisted on the session.
///
/// Append-only: a record is never mutated once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    /// The trainee's utterance (trimmed).
    pub user_response: String,
    /// The character's in-character reply.
    pub ai_response: String,
    /// Sentiment label for the reply; see [`crate::sentiment`].
    pub sentiment: String,
    /// Structured feedback on the utterance.
    pub feedback: FeedbackRubric,
    pub timestamp: Timestamp,
}
