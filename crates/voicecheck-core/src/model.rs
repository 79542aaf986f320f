//! Core data model types for voicecheck.
//!
//! The quiz has a single immutable [`Question`]; everything derived from a
//! response ([`EvaluationResult`], [`ConfidenceAssessment`]) is a value that
//! is created once and never mutated.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::error::QuizError;

/// Question posed when the user does not configure one.
pub const DEFAULT_PROMPT: &str = "Назовите пять основных встроенных типов данных в Python.";

/// Reference answer for [`DEFAULT_PROMPT`].
pub const DEFAULT_REFERENCE_ANSWER: &str = "числа строки списки кортежи словари";

/// Chat identity of a quiz participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a voice message held by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AudioHandle(String);

impl AudioHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for AudioHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The quiz question together with the keywords it is graded against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    prompt: String,
    reference_answer: String,
    reference_keywords: Vec<String>,
}

impl Question {
    /// Build a question, rejecting a blank prompt or a reference answer
    /// without keywords.
    pub fn new(
        prompt: impl Into<String>,
        reference_answer: impl Into<String>,
    ) -> Result<Self, QuizError> {
        let prompt = prompt.into();
        let reference_answer = reference_answer.into();

        if prompt.trim().is_empty() {
            return Err(QuizError::EmptyPrompt);
        }

        let reference_keywords = keyword_tokens(&reference_answer);
        if reference_keywords.is_empty() {
            return Err(QuizError::EmptyReferenceAnswer);
        }

        Ok(Self {
            prompt,
            reference_answer,
            reference_keywords,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The reference answer as written.
    pub fn reference_answer(&self) -> &str {
        &self.reference_answer
    }

    /// Lower-cased, de-duplicated keywords in first-occurrence order. Never empty.
    pub fn reference_keywords(&self) -> &[String] {
        &self.reference_keywords
    }

    /// Reference answer as a comma-separated listing, e.g. `числа, строки`.
    pub fn expected_listing(&self) -> String {
        self.reference_answer
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Question {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            reference_answer: DEFAULT_REFERENCE_ANSWER.to_string(),
            reference_keywords: keyword_tokens(DEFAULT_REFERENCE_ANSWER),
        }
    }
}

/// Lower-case `text` and split it on whitespace, dropping repeated tokens.
pub(crate) fn keyword_tokens(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in text.to_lowercase().split_whitespace() {
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

/// Recall score kept as an exact ratio of matched to reference keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Score {
    matched: usize,
    total: usize,
}

impl Score {
    pub(crate) fn new(matched: usize, total: usize) -> Self {
        debug_assert!(total > 0, "reference keywords are never empty");
        debug_assert!(matched <= total);
        Self { matched, total }
    }

    pub fn matched(&self) -> usize {
        self.matched
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// The score as a fraction in `[0, 1]`.
    pub fn value(&self) -> f64 {
        self.matched as f64 / self.total as f64
    }

    /// Nearest whole percent, ties to even. For display only.
    pub fn percent(&self) -> u32 {
        let scaled = self.matched * 100;
        let (mut percent, rem) = (scaled / self.total, scaled % self.total);
        if 2 * rem > self.total || (2 * rem == self.total && percent % 2 == 1) {
            percent += 1;
        }
        percent as u32
    }

    pub fn is_perfect(&self) -> bool {
        self.matched == self.total
    }

    pub fn is_zero(&self) -> bool {
        self.matched == 0
    }

    /// Strictly greater than one half, without going through floats.
    pub fn exceeds_half(&self) -> bool {
        self.matched * 2 > self.total
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Score", 3)?;
        state.serialize_field("matched", &self.matched)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("value", &self.value())?;
        state.end()
    }
}

/// Outcome of grading one recognized text against the question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    /// Reference keywords present in the response, in reference order.
    pub matched_keywords: Vec<String>,
    /// Reference keywords absent from the response, in reference order.
    pub missing_keywords: Vec<String>,
    pub correctness_score: Score,
}

/// Coarse confidence bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Low,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "high"),
            ConfidenceLevel::Low => write!(f, "low"),
        }
    }
}

/// Confidence bucket plus the phrase used to narrate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfidenceAssessment {
    pub level: ConfidenceLevel,
    pub exemplar_phrase: String,
}

/// Phrases describing how the user sounded, one non-empty set per level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfidencePhrases {
    high: Vec<String>,
    low: Vec<String>,
}

impl ConfidencePhrases {
    pub fn new(high: Vec<String>, low: Vec<String>) -> Result<Self, QuizError> {
        if high.is_empty() {
            return Err(QuizError::EmptyPhraseSet {
                level: ConfidenceLevel::High,
            });
        }
        if low.is_empty() {
            return Err(QuizError::EmptyPhraseSet {
                level: ConfidenceLevel::Low,
            });
        }
        Ok(Self { high, low })
    }

    pub fn for_level(&self, level: ConfidenceLevel) -> &[String] {
        match level {
            ConfidenceLevel::High => &self.high,
            ConfidenceLevel::Low => &self.low,
        }
    }
}

impl Default for ConfidencePhrases {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            high: owned(&["уверенно", "четко", "без пауз", "ровным голосом"]),
            low: owned(&["с паузами", "неуверенно", "тихим голосом", "с запинками"]),
        }
    }
}
