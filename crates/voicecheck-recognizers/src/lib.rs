//! voicecheck-recognizers: Speech recognizer adapters and configuration.
//!
//! Implements the `Recognizer` and `ExemplarPicker` traits from
//! `voicecheck-core` and builds them from `voicecheck.toml`.

pub mod config;
pub mod error;
pub mod fixed;
pub mod picker;
pub mod stub;

pub use config::{create_picker, create_recognizer, load_config_from, RecognizerConfig, VoicecheckConfig};
pub use error::RecognizerError;
pub use fixed::FixedRecognizer;
pub use picker::RandomExemplarPicker;
pub use stub::WeightedStubRecognizer;
