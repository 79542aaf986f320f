//! Recognizer construction errors.

use thiserror::Error;

/// Errors raised while building a recognizer. Recognition itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognizerError {
    /// The stub was given nothing to choose from.
    #[error("stub recognizer needs at least one candidate")]
    NoCandidates,

    /// Candidates and weights differ in length.
    #[error("{candidates} candidates but {weights} weights")]
    WeightCountMismatch { candidates: usize, weights: usize },

    /// Weights are negative, non-finite or all zero.
    #[error("invalid candidate weights: {0}")]
    InvalidWeights(String),
}
