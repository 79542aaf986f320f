//! The `voicecheck validate` command.

use std::path::PathBuf;

use anyhow::Result;

use voicecheck_core::ConfidenceLevel;
use voicecheck_recognizers::RecognizerConfig;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let (config, engine) = super::build_engine(config_path.as_deref())?;
    let question = engine.question();

    println!("Question: {}", question.prompt());
    println!(
        "  {} reference keywords: {}",
        question.reference_keywords().len(),
        question.reference_keywords().join(", ")
    );

    match &config.recognizer {
        RecognizerConfig::Stub {
            candidates,
            latency_ms,
        } => println!(
            "  Recognizer: stub ({} candidates, {}ms latency)",
            candidates.len(),
            latency_ms
        ),
        RecognizerConfig::Fixed { text } => println!("  Recognizer: fixed (\"{text}\")"),
    }

    let phrases = config.build_phrases()?;
    println!(
        "  Confidence phrases: {} high / {} low",
        phrases.for_level(ConfidenceLevel::High).len(),
        phrases.for_level(ConfidenceLevel::Low).len()
    );

    if let Some(seed) = config.seed {
        println!("  Seed: {seed}");
    }

    println!("Config valid.");
    Ok(())
}
