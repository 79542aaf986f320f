//! Fixed-output recognizer for tests and scripted demos.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use voicecheck_core::model::AudioHandle;
use voicecheck_core::traits::Recognizer;

/// A recognizer that transcribes every voice message to the same text.
pub struct FixedRecognizer {
    text: String,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Last audio handle received.
    last_audio: Mutex<Option<AudioHandle>>,
}

impl FixedRecognizer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            call_count: AtomicU32::new(0),
            last_audio: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this recognizer.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last audio handle passed to this recognizer.
    pub fn last_audio(&self) -> Option<AudioHandle> {
        self.last_audio
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Recognizer for FixedRecognizer {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn recognize(&self, audio: &AudioHandle) -> String {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_audio.lock().unwrap_or_else(PoisonError::into_inner) = Some(audio.clone());
        self.text.clone()
    }
}
