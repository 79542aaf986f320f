pub mod chat;
pub mod evaluate;
pub mod init;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use voicecheck_core::QuizEngine;
use voicecheck_recognizers::config::load_config_from;
use voicecheck_recognizers::{create_picker, create_recognizer, VoicecheckConfig};

/// Load the config and wire up the engine it describes.
pub fn build_engine(config_path: Option<&Path>) -> Result<(VoicecheckConfig, QuizEngine)> {
    let config = load_config_from(config_path)?;
    let question = config.build_question()?;
    let phrases = config.build_phrases()?;
    let recognizer = create_recognizer(&config.recognizer, config.seed)?;
    let picker = create_picker(config.seed);

    let engine = QuizEngine::new(
        Arc::new(question),
        phrases,
        Arc::from(recognizer),
        Arc::from(picker),
    );
    Ok((config, engine))
}
