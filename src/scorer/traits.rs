// Scorer trait: the per-locale classifier boundary.
//
// A scorer answers one question about one normalized word. How it does that
// (ONNX graph, word list, anything else) is invisible to the classifiers.
// Scorers are built by a ScorerFactory, one per requested locale, at detector
// construction time.

use anyhow::Result;
use serde::Serialize;

use crate::error::DetectorError;
use crate::locale::Locale;

/// One scorer's answer for one normalized word.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub is_profane: bool,
    /// Probability of the word being profane, 0.0 to 1.0
    pub probability: f32,
}

impl Prediction {
    /// The contribution of a scorer that failed on this word.
    pub const CLEAN: Prediction = Prediction {
        is_profane: false,
        probability: 0.0,
    };

    /// Build a prediction from a probability and a decision threshold.
    /// The probability is clamped into [0, 1].
    pub fn from_probability(probability: f32, threshold: f32) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self {
            is_profane: probability >= threshold,
            probability,
        }
    }
}

/// A loaded per-locale profanity classifier.
///
/// Implementations must be safe to call concurrently through `&self`; adapters
/// whose runtime needs exclusive access serialize internally.
pub trait Scorer: Send + Sync {
    /// Classify a word that has already been normalized.
    fn predict(&self, normalized_word: &str) -> Result<Prediction>;
}

/// Builds the scorer for a locale, or explains why it can't.
pub trait ScorerFactory {
    fn load(&self, locale: Locale) -> Result<Box<dyn Scorer>, DetectorError>;
}

impl<F> ScorerFactory for F
where
    F: Fn(Locale) -> Result<Box<dyn Scorer>, DetectorError>,
{
    fn load(&self, locale: Locale) -> Result<Box<dyn Scorer>, DetectorError> {
        self(locale)
    }
}
