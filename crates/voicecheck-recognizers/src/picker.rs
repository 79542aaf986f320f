//! Uniform random exemplar phrase selection.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use voicecheck_core::model::ConfidenceLevel;
use voicecheck_core::traits::ExemplarPicker;

/// Picks a phrase uniformly at random from the level's set.
pub struct RandomExemplarPicker {
    rng: Mutex<StdRng>,
}

impl RandomExemplarPicker {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Default for RandomExemplarPicker {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ExemplarPicker for RandomExemplarPicker {
    fn pick_exemplar_phrase<'a>(&self, _level: ConfidenceLevel, phrases: &'a [String]) -> &'a str {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        phrases
            .choose(&mut *rng)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
