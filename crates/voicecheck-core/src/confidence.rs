//! Confidence heuristic.
//!
//! There is no acoustic analysis: the bucket is read straight off the
//! correctness score and the narrative phrase is picked from the bucket's set.

use crate::model::{ConfidenceAssessment, ConfidenceLevel, ConfidencePhrases};
use crate::traits::ExemplarPicker;

/// Scores strictly above this are `high`. Unrelated to the feedback tiers.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Bucket a correctness score in `[0, 1]`.
pub fn confidence_level(correctness_score: f64) -> ConfidenceLevel {
    if correctness_score > HIGH_CONFIDENCE_THRESHOLD {
        ConfidenceLevel::High
    } else {
        ConfidenceLevel::Low
    }
}

/// Derive the confidence bucket and an exemplar phrase for a score.
pub fn assess_confidence(
    correctness_score: f64,
    phrases: &ConfidencePhrases,
    picker: &dyn ExemplarPicker,
) -> ConfidenceAssessment {
    let level = confidence_level(correctness_score);
    let exemplar_phrase = picker
        .pick_exemplar_phrase(level, phrases.for_level(level))
        .to_string();

    ConfidenceAssessment {
        level,
        exemplar_phrase,
    }
}
