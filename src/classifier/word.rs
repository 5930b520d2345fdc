// Word-level classification across every loaded locale.
//
// Aggregation is OR for the verdict and MAX for the probability: a word that
// any configured language flags is treated as profane, and the most
// confident locale sets the probability.

use serde::Serialize;
use tracing::warn;

use crate::error::{DetectorError, Result};
use crate::locale::Locale;
use crate::normalize::normalize;
use crate::scorer::traits::{Prediction, Scorer};

/// A loaded scorer tagged with the locale it was built for.
pub struct LocaleScorer {
    pub locale: Locale,
    pub scorer: Box<dyn Scorer>,
}

impl LocaleScorer {
    pub fn new(locale: Locale, scorer: Box<dyn Scorer>) -> Self {
        Self { locale, scorer }
    }

    /// Ask this scorer about an already-normalized word.
    ///
    /// A scorer fault is logged and counts as a clean prediction for this
    /// locale only; the other locales still contribute.
    fn predict(&self, normalized: &str) -> Prediction {
        match self.scorer.predict(normalized) {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!(
                    locale = %self.locale,
                    error = %e,
                    word = %crate::output::truncate_chars(normalized, 32),
                    "Scorer failed, treating word as clean for this locale"
                );
                Prediction::CLEAN
            }
        }
    }
}

/// One locale's prediction for a word.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocalePrediction {
    pub locale: Locale,
    #[serde(flatten)]
    pub prediction: Prediction,
}

/// The aggregated result for a single word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordVerdict {
    /// The word as given
    pub token: String,
    /// What the scorers actually saw
    pub normalized: String,
    pub is_profane: bool,
    pub probability: f32,
}

/// Combines per-locale scorers into word-level answers.
///
/// Always holds at least one scorer.
pub struct WordClassifier {
    scorers: Vec<LocaleScorer>,
}

impl WordClassifier {
    /// Build a classifier; fails with `NoLocales` when `scorers` is empty.
    pub fn new(scorers: Vec<LocaleScorer>) -> Result<Self> {
        if scorers.is_empty() {
            return Err(DetectorError::NoLocales);
        }
        Ok(Self { scorers })
    }

    /// Locales in load order.
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.scorers.iter().map(|s| s.locale)
    }

    /// True if any locale flags the word.
    pub fn is_profane(&self, word: &str) -> bool {
        let normalized = normalize(word);
        self.scorers
            .iter()
            .any(|s| s.predict(&normalized).is_profane)
    }

    /// Highest probability any locale assigns to the word.
    pub fn profanity_probability(&self, word: &str) -> f32 {
        let normalized = normalize(word);
        max_probability(self.scorers.iter().map(|s| s.predict(&normalized)))
    }

    /// Every locale's prediction for the word, in load order.
    pub fn predictions(&self, word: &str) -> Vec<LocalePrediction> {
        let normalized = normalize(word);
        self.scorers
            .iter()
            .map(|s| LocalePrediction {
                locale: s.locale,
                prediction: s.predict(&normalized),
            })
            .collect()
    }

    /// Verdict and probability from a single pass over the scorers.
    pub fn classify(&self, word: &str) -> WordVerdict {
        let normalized = normalize(word);
        let predictions: Vec<Prediction> =
            self.scorers.iter().map(|s| s.predict(&normalized)).collect();

        WordVerdict {
            token: word.to_string(),
            is_profane: predictions.iter().any(|p| p.is_profane),
            probability: max_probability(predictions.into_iter()),
            normalized,
        }
    }
}

/// MAX over predictions; 0.0 when there are none.
fn max_probability(predictions: impl Iterator<Item = Prediction>) -> f32 {
    predictions.map(|p| p.probability).fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Prediction);

    impl Scorer for Fixed {
        fn predict(&self, _word: &str) -> anyhow::Result<Prediction> {
            Ok(self.0)
        }
    }

    struct Broken;

    impl Scorer for Broken {
        fn predict(&self, _word: &str) -> anyhow::Result<Prediction> {
            anyhow::bail!("inference exploded")
        }
    }

    fn fixed(locale: Locale, is_profane: bool, probability: f32) -> LocaleScorer {
        LocaleScorer::new(
            locale,
            Box::new(Fixed(Prediction {
                is_profane,
                probability,
            })),
        )
    }

    #[test]
    fn test_empty_scorer_set_rejected() {
        let err = WordClassifier::new(Vec::new()).err().unwrap();
        assert!(matches!(err, DetectorError::NoLocales));
    }

    #[test]
    fn test_any_locale_makes_word_profane() {
        let words = WordClassifier::new(vec![
            fixed(Locale::English, false, 0.2),
            fixed(Locale::Spanish, true, 0.8),
        ])
        .unwrap();
        assert!(words.is_profane("palabra"));
    }

    #[test]
    fn test_probability_is_max_not_mean() {
        let words = WordClassifier::new(vec![
            fixed(Locale::English, false, 0.1),
            fixed(Locale::Spanish, true, 0.95),
            fixed(Locale::Portuguese, false, 0.3),
        ])
        .unwrap();
        assert!((words.profanity_probability("x") - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_failing_scorer_degrades_to_clean() {
        let words = WordClassifier::new(vec![
            LocaleScorer::new(Locale::English, Box::new(Broken)),
            fixed(Locale::Spanish, false, 0.4),
        ])
        .unwrap();
        assert!(!words.is_profane("x"));
        assert!((words.profanity_probability("x") - 0.4).abs() < 1e-6);

        let preds = words.predictions("x");
        assert_eq!(preds[0].prediction, Prediction::CLEAN);
    }

    #[test]
    fn test_classify_reports_normalized_form() {
        let words = WordClassifier::new(vec![fixed(Locale::English, true, 0.7)]).unwrap();
        let verdict = words.classify("d@mn!");
        assert_eq!(verdict.token, "d@mn!");
        assert_eq!(verdict.normalized, "d@mn");
        assert!(verdict.is_profane);
        assert!((verdict.probability - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_locales_in_load_order() {
        let words = WordClassifier::new(vec![
            fixed(Locale::Portuguese, false, 0.0),
            fixed(Locale::English, false, 0.0),
        ])
        .unwrap();
        assert_eq!(
            words.locales().collect::<Vec<_>>(),
            vec![Locale::Portuguese, Locale::English]
        );
    }
}
