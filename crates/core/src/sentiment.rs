//! Sentiment classification taxonomy for roleplay character replies.

use crate::error::CoreError;

/// The character responded warmly / the conversation is going well.
pub const SENTIMENT_POSITIVE: &str = "positive";
/// No strong emotional signal either way.
pub const SENTIMENT_NEUTRAL: &str = "neutral";
/// The character is unhappy with how the exchange is going.
pub const SENTIMENT_NEGATIVE: &str = "negative";
/// The character is in acute distress and needs careful handling.
pub const SENTIMENT_DISTRESSED: &str = "distressed";

/// All valid sentiment labels.
pub const VALID_SENTIMENTS: &[&str] = &[
    SENTIMENT_POSITIVE,
    SENTIMENT_NEUTRAL,
    SENTIMENT_NEGATIVE,
    SENTIMENT_DISTRESSED,
];

/// Validate a sentiment label produced by the generation service.
///
/// Model output is untrusted; an unknown label is rejected rather than
/// stored.
pub fn validate_sentiment(sentiment: &str) -> Result<(), CoreError> {
    if VALID_SENTIMENTS.contains(&sentiment) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown sentiment: '{sentiment}'. Valid sentiments: {}",
            VALID_SENTIMENTS.join(", ")
        )))
    }
}
