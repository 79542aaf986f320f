//! Quiz error types.
//!
//! Construction errors mean a programming or configuration mistake and are
//! rejected up front. `NotAwaitingResponse` is the only error a well-formed
//! quiz produces at runtime, and it is recoverable.

use thiserror::Error;

use crate::model::{ConfidenceLevel, UserId};

/// Errors produced by the quiz core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// A response arrived while no question was pending for this user.
    #[error("user {user} is not awaiting a response")]
    NotAwaitingResponse { user: UserId },

    /// The reference answer has no whitespace-delimited tokens.
    #[error("reference answer must contain at least one keyword")]
    EmptyReferenceAnswer,

    /// The question prompt is blank.
    #[error("question prompt is empty")]
    EmptyPrompt,

    /// A confidence phrase set has no phrases to pick from.
    #[error("no exemplar phrases configured for {level} confidence")]
    EmptyPhraseSet { level: ConfidenceLevel },
}

impl QuizError {
    /// Returns `true` if the caller should answer with a prompt rather than fail.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, QuizError::NotAwaitingResponse { .. })
    }
}
