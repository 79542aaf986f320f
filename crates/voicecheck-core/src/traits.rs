//! Seams to the outside world: speech recognition and phrase selection.
//!
//! Both are randomized in the shipped stubs. Tests substitute deterministic
//! implementations without touching the evaluator or the composer.

use async_trait::async_trait;

use crate::model::{AudioHandle, ConfidenceLevel};

// ---------------------------------------------------------------------------
// Speech recognition
// ---------------------------------------------------------------------------

/// Turns a voice message into text.
///
/// Implementations never fail on recognition quality: an inaudible or
/// garbled message comes back as empty or nonsensical text and is graded
/// like any other answer.
#[async_trait]
pub trait Recognizer: Send + Sync {
    /// Short identifier (e.g. "stub").
    fn name(&self) -> &str;

    /// Transcribe the audio behind `audio`.
    async fn recognize(&self, audio: &AudioHandle) -> String;
}

// ---------------------------------------------------------------------------
// Exemplar phrase selection
// ---------------------------------------------------------------------------

/// Chooses the phrase that narrates a confidence level.
pub trait ExemplarPicker: Send + Sync {
    /// Pick one of `phrases`. The slice is never empty.
    fn pick_exemplar_phrase<'a>(&self, level: ConfidenceLevel, phrases: &'a [String]) -> &'a str;
}

/// Always picks the first phrase of the set.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstExemplarPicker;

impl ExemplarPicker for FirstExemplarPicker {
    fn pick_exemplar_phrase<'a>(&self, _level: ConfidenceLevel, phrases: &'a [String]) -> &'a str {
        phrases.first().map(String::as_str).unwrap_or_default()
    }
}
