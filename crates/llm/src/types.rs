//! Output types produced by the generation service.

use serde::{Deserialize, Serialize};

/// One in-character reply from the roleplayed character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterReply {
    /// The character's next line.
    pub message: String,
    /// Sentiment label; validated against `carefully_core::sentiment`.
    pub sentiment: String,
    /// Whether the model judges the conversation worth continuing.
    pub should_continue: bool,
}
