//! Weighted random stand-in for a speech-to-text service.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::SeedableRng;

use voicecheck_core::model::AudioHandle;
use voicecheck_core::traits::Recognizer;

use crate::error::RecognizerError;

/// Transcripts the stub answers with, and how often.
pub const DEFAULT_CANDIDATES: [(&str, f64); 4] = [
    ("числа строки списки кортежи словари", 0.6),
    ("числа строки списки кортежи множества", 0.15),
    ("числа строки списки словари", 0.15),
    ("я не знаю", 0.10),
];

/// Picks one of a fixed set of transcripts at random, ignoring the audio.
///
/// Mostly right, sometimes partially wrong, occasionally clueless, so every
/// feedback tier shows up in a demo session.
pub struct WeightedStubRecognizer {
    candidates: Vec<String>,
    index: WeightedIndex<f64>,
    rng: Mutex<StdRng>,
    latency: Duration,
}

impl std::fmt::Debug for WeightedStubRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeightedStubRecognizer")
            .field("candidates", &self.candidates)
            .field("latency", &self.latency)
            .finish()
    }
}

impl WeightedStubRecognizer {
    /// Create a stub over `candidates` with matching `weights`.
    ///
    /// With `seed` set, the sequence of transcripts is reproducible.
    pub fn new(
        candidates: Vec<String>,
        weights: Vec<f64>,
        seed: Option<u64>,
    ) -> Result<Self, RecognizerError> {
        if candidates.is_empty() {
            return Err(RecognizerError::NoCandidates);
        }
        if candidates.len() != weights.len() {
            return Err(RecognizerError::WeightCountMismatch {
                candidates: candidates.len(),
                weights: weights.len(),
            });
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(RecognizerError::InvalidWeights(
                "weights must be finite".into(),
            ));
        }

        let index = WeightedIndex::new(&weights)
            .map_err(|e| RecognizerError::InvalidWeights(e.to_string()))?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            candidates,
            index,
            rng: Mutex::new(rng),
            latency: Duration::ZERO,
        })
    }

    /// The stub with its built-in transcripts and weights.
    pub fn with_defaults(seed: Option<u64>) -> Self {
        let (candidates, weights): (Vec<String>, Vec<f64>) = DEFAULT_CANDIDATES
            .iter()
            .map(|(text, weight)| (text.to_string(), *weight))
            .unzip();
        Self::new(candidates, weights, seed)
            .unwrap_or_else(|e| unreachable!("built-in candidates are valid: {e}"))
    }

    /// Sleep this long before answering, to mimic a remote call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    fn draw(&self) -> &str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let i = self.index.sample(&mut *rng);
        &self.candidates[i]
    }
}

#[async_trait]
impl Recognizer for WeightedStubRecognizer {
    fn name(&self) -> &str {
        "stub"
    }

    async fn recognize(&self, audio: &AudioHandle) -> String {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let text = self.draw().to_string();
        tracing::debug!(audio = %audio, text = %text, "stub transcript drawn");
        text
    }
}
