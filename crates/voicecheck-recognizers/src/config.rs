//! Quiz configuration and recognizer factory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use voicecheck_core::model::{
    ConfidenceLevel, ConfidencePhrases, Question, DEFAULT_PROMPT, DEFAULT_REFERENCE_ANSWER,
};
use voicecheck_core::traits::{ExemplarPicker, Recognizer};

use crate::fixed::FixedRecognizer;
use crate::picker::RandomExemplarPicker;
use crate::stub::{WeightedStubRecognizer, DEFAULT_CANDIDATES};

/// Which speech recognizer to use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecognizerConfig {
    /// Weighted random transcripts.
    Stub {
        #[serde(default = "default_candidates")]
        candidates: Vec<CandidateConfig>,
        /// Simulated recognition delay.
        #[serde(default)]
        latency_ms: u64,
    },
    /// Always the same transcript.
    Fixed { text: String },
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        RecognizerConfig::Stub {
            candidates: default_candidates(),
            latency_ms: 0,
        }
    }
}

/// One stub transcript and its relative weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateConfig {
    pub text: String,
    pub weight: f64,
}

fn default_candidates() -> Vec<CandidateConfig> {
    DEFAULT_CANDIDATES
        .iter()
        .map(|(text, weight)| CandidateConfig {
            text: text.to_string(),
            weight: *weight,
        })
        .collect()
}

/// The question and the answer it is graded against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionConfig {
    #[serde(default = "default_prompt")]
    pub prompt: String,
    #[serde(default = "default_reference_answer")]
    pub reference_answer: String,
}

impl Default for QuestionConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            reference_answer: default_reference_answer(),
        }
    }
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}
fn default_reference_answer() -> String {
    DEFAULT_REFERENCE_ANSWER.to_string()
}

/// Exemplar phrases for each confidence level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceConfig {
    #[serde(default = "default_high_phrases")]
    pub high: Vec<String>,
    #[serde(default = "default_low_phrases")]
    pub low: Vec<String>,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            high: default_high_phrases(),
            low: default_low_phrases(),
        }
    }
}

fn default_high_phrases() -> Vec<String> {
    ConfidencePhrases::default()
        .for_level(ConfidenceLevel::High)
        .to_vec()
}
fn default_low_phrases() -> Vec<String> {
    ConfidencePhrases::default()
        .for_level(ConfidenceLevel::Low)
        .to_vec()
}

/// Top-level voicecheck configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VoicecheckConfig {
    #[serde(default)]
    pub question: QuestionConfig,
    #[serde(default)]
    pub confidence: ConfidenceConfig,
    #[serde(default)]
    pub recognizer: RecognizerConfig,
    /// Seed for every random choice; unset means a fresh seed per run.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl VoicecheckConfig {
    /// Build the validated question.
    pub fn build_question(&self) -> Result<Question> {
        Question::new(&self.question.prompt, &self.question.reference_answer)
            .context("invalid [question] section")
    }

    /// Build the validated phrase sets.
    pub fn build_phrases(&self) -> Result<ConfidencePhrases> {
        ConfidencePhrases::new(self.confidence.high.clone(), self.confidence.low.clone())
            .context("invalid [confidence] section")
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut search_from = 0;
    while let Some(offset) = result[search_from..].find("${") {
        let start = search_from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!("{}{}{}", &result[..start], value, &result[start + end + 1..]);
        search_from = start + value.len();
    }
    result
}

fn resolve_config_env_vars(config: &mut VoicecheckConfig) {
    config.question.prompt = resolve_env_vars(&config.question.prompt);
    config.question.reference_answer = resolve_env_vars(&config.question.reference_answer);
    if let RecognizerConfig::Fixed { text } = &mut config.recognizer {
        *text = resolve_env_vars(text);
    }
}

/// Apply `VOICECHECK_*` overrides using `lookup` to read variables.
fn apply_env_overrides(
    config: &mut VoicecheckConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(seed) = lookup("VOICECHECK_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("VOICECHECK_SEED is not a number: '{seed}'"))?;
        config.seed = Some(seed);
    }
    Ok(())
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `voicecheck.toml` in the current directory
/// 2. `~/.config/voicecheck/config.toml`
///
/// Environment variable override: `VOICECHECK_SEED`.
pub fn load_config_from(path: Option<&Path>) -> Result<VoicecheckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("voicecheck.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => VoicecheckConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    match &config_path {
        Some(path) => tracing::debug!("loaded config from {}", path.display()),
        None => tracing::debug!("no config file found, using defaults"),
    }

    Ok(config)
}

/// Parse a TOML string into a config, resolving `${VAR}` references.
pub fn parse_config_str(content: &str) -> Result<VoicecheckConfig> {
    let mut config: VoicecheckConfig = toml::from_str(content)?;
    resolve_config_env_vars(&mut config);
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("voicecheck"))
}

/// Create a recognizer instance from its configuration.
pub fn create_recognizer(
    config: &RecognizerConfig,
    seed: Option<u64>,
) -> Result<Box<dyn Recognizer>> {
    match config {
        RecognizerConfig::Stub {
            candidates,
            latency_ms,
        } => {
            let (texts, weights): (Vec<String>, Vec<f64>) = candidates
                .iter()
                .map(|c| (c.text.clone(), c.weight))
                .unzip();
            let stub = WeightedStubRecognizer::new(texts, weights, seed)
                .context("invalid [recognizer] candidates")?
                .with_latency(Duration::from_millis(*latency_ms));
            Ok(Box::new(stub))
        }
        RecognizerConfig::Fixed { text } => Ok(Box::new(FixedRecognizer::new(text.clone()))),
    }
}

/// Create the exemplar phrase picker.
///
/// Derives its own stream from `seed` so it does not mirror the recognizer's draws.
pub fn create_picker(seed: Option<u64>) -> Box<dyn ExemplarPicker> {
    Box::new(RandomExemplarPicker::new(seed.map(|s| s.wrapping_add(1))))
}
