//! Per-turn feedback rubrics and the deterministic session score
//! aggregation.
//!
//! Rubric *generation* happens in the `llm` crate and is inherently
//! non-deterministic; everything here is pure arithmetic over already-stored
//! rubrics so a session's overall score can be recomputed for auditing from
//! the persisted feedback list alone.

use serde::{Deserialize, Serialize};

/// Lowest admissible axis or overall score.
pub const SCORE_MIN: i32 = 0;
/// Highest admissible axis or overall score.
pub const SCORE_MAX: i32 = 100;

/// Structured feedback for a single user utterance.
///
/// Four independent axes, each 0-100, plus the model's own overall
/// impression and prose guidance. Axis values are clamped at parse time
/// (`clamp_score`), so stored rubrics are always in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRubric {
    /// Did the response acknowledge the character's feelings?
    pub empathy: i32,
    /// Was the wording calm and respectful?
    pub tone: i32,
    /// Was the response easy to follow?
    pub clarity: i32,
    /// Did the response move the situation forward appropriately?
    pub decision_making: i32,
    /// The model's single-number impression of the utterance.
    pub overall_score: i32,
    /// One- or two-sentence prose summary of the feedback.
    pub summary: String,
    /// Concrete suggestions for improvement.
    pub suggestions: Vec<String>,
}

impl FeedbackRubric {
    /// Mean of the four axis scores.
    ///
    /// This, not `overall_score`, is what feeds the session score so the
    /// aggregate stays reproducible from the stored axes.
    pub fn axis_mean(&self) -> f64 {
        f64::from(self.empathy + self.tone + self.clarity + self.decision_making) / 4.0
    }
}

/// Clamp a raw model-reported score into the valid `[0, 100]` range.
pub fn clamp_score(raw: i64) -> i32 {
    raw.clamp(i64::from(SCORE_MIN), i64::from(SCORE_MAX)) as i32
}

/// Aggregate per-turn rubrics into the session's overall score.
///
/// The session score is the mean across turns of each turn's four-axis
/// mean, rounded to the nearest integer. A session completed before any
/// turn was recorded scores 0.
pub fn session_score(rubrics: &[FeedbackRubric]) -> i32 {
    if rubrics.is_empty() {
        return 0;
    }
    let sum: f64 = rubrics.iter().map(FeedbackRubric::axis_mean).sum();
    clamp_score((sum / rubrics.len() as f64).round() as i64)
}
