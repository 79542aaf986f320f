//! voicecheck-core: Answer evaluation and session state engine.
//!
//! This crate defines the quiz data model, the keyword-overlap evaluator,
//! the confidence heuristic, feedback composition and the per-user session
//! state machine that sequences them.

pub mod confidence;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod feedback;
pub mod model;
pub mod replies;
pub mod session;
pub mod traits;

pub use engine::{CycleReporter, InboundEvent, NoopReporter, OutboundReply, QuizEngine};
pub use error::QuizError;
pub use feedback::{FeedbackReport, FeedbackTier};
pub use model::{
    AudioHandle, ConfidenceAssessment, ConfidenceLevel, ConfidencePhrases, EvaluationResult,
    Question, Score, UserId,
};
pub use session::SessionState;
pub use traits::{ExemplarPicker, FirstExemplarPicker, Recognizer};
