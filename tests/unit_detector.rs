// Unit tests for detector aggregation.
//
// Mock scorers stand in for trained models: each one maps words to fixed
// predictions and records what it was asked, so the tests can check both the
// aggregation laws and what reaches the scorers after normalization.

use std::collections::HashMap;
use std::sync::Mutex;

use badword::{DetectorError, Locale, Prediction, ProfanityDetector, Scorer};
use proptest::prelude::*;

/// Scorer with a fixed answer table; unknown words get `fallback`.
struct MockScorer {
    table: HashMap<String, Prediction>,
    fallback: Prediction,
    seen: Mutex<Vec<String>>,
}

impl MockScorer {
    fn new(entries: &[(&str, bool, f32)], fallback: Prediction) -> Self {
        Self {
            table: entries
                .iter()
                .map(|&(word, is_profane, probability)| {
                    (
                        word.to_string(),
                        Prediction {
                            is_profane,
                            probability,
                        },
                    )
                })
                .collect(),
            fallback,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl Scorer for MockScorer {
    fn predict(&self, normalized_word: &str) -> anyhow::Result<Prediction> {
        self.seen.lock().unwrap().push(normalized_word.to_string());
        Ok(self
            .table
            .get(normalized_word)
            .copied()
            .unwrap_or(self.fallback))
    }
}

/// Forwards to a shared MockScorer so a test can inspect it afterwards.
struct Shared(std::sync::Arc<MockScorer>);

impl Scorer for Shared {
    fn predict(&self, normalized_word: &str) -> anyhow::Result<Prediction> {
        self.0.predict(normalized_word)
    }
}

fn entry(locale: Locale, scorer: impl Scorer + 'static) -> (Locale, Box<dyn Scorer>) {
    (locale, Box::new(scorer))
}

const LOW: Prediction = Prediction {
    is_profane: false,
    probability: 0.1,
};

/// `foo` is profane at 0.9, every other word is clean at 0.1.
fn foo_detector() -> ProfanityDetector {
    let scorer = MockScorer::new(&[("foo", true, 0.9)], LOW);
    ProfanityDetector::from_scorers(vec![entry(Locale::English, scorer)]).unwrap()
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

// ============================================================
// Concrete scenarios
// ============================================================

#[test]
fn profane_word_is_flagged() {
    assert!(foo_detector().is_profane("foo"));
}

#[test]
fn clean_word_is_not_flagged() {
    assert!(!foo_detector().is_profane("bar"));
}

#[test]
fn phrase_with_profane_token_is_profane() {
    assert!(foo_detector().is_phrase_profane("this foo thing"));
}

#[test]
fn clean_phrase_probability_is_max_token_probability() {
    let p = foo_detector().phrase_profanity_probability("this bar thing");
    assert!(approx(p, 0.1), "expected 0.1, got {p}");
}

#[test]
fn mask_replaces_profane_token() {
    assert_eq!(
        foo_detector().mask_profanity("this foo thing", '*'),
        "this *** thing"
    );
}

#[test]
fn scorer_sees_normalized_word() {
    let mock = std::sync::Arc::new(MockScorer::new(&[], LOW));
    let detector =
        ProfanityDetector::from_scorers(vec![entry(Locale::English, Shared(mock.clone()))])
            .unwrap();

    detector.is_profane("f@@!");

    assert_eq!(*mock.seen.lock().unwrap(), vec!["f@@".to_string()]);
}

#[test]
fn punctuation_does_not_hide_profanity() {
    let detector = foo_detector();
    assert!(detector.is_profane("foo!!!"));
    assert_eq!(detector.mask("oh, foo!!!"), "oh, ******");
}

// ============================================================
// Multi-locale aggregation
// ============================================================

#[test]
fn verdict_is_or_across_locales() {
    let english = MockScorer::new(&[], LOW);
    let spanish = MockScorer::new(&[("puta", true, 0.97)], LOW);
    let detector = ProfanityDetector::from_scorers(vec![
        entry(Locale::English, english),
        entry(Locale::Spanish, spanish),
    ])
    .unwrap();

    assert!(detector.is_profane("puta"));
    assert!(approx(detector.profanity_probability("puta"), 0.97));
}

#[test]
fn probability_is_max_across_locales() {
    let english = MockScorer::new(&[("word", false, 0.45)], LOW);
    let spanish = MockScorer::new(&[("word", false, 0.2)], LOW);
    let portuguese = MockScorer::new(&[("word", false, 0.3)], LOW);
    let detector = ProfanityDetector::from_scorers(vec![
        entry(Locale::English, english),
        entry(Locale::Spanish, spanish),
        entry(Locale::Portuguese, portuguese),
    ])
    .unwrap();

    assert!(approx(detector.profanity_probability("word"), 0.45));
    assert!(!detector.is_profane("word"));
}

#[test]
fn predictions_are_reported_per_locale() {
    let english = MockScorer::new(&[("x", false, 0.3)], LOW);
    let spanish = MockScorer::new(&[("x", true, 0.8)], LOW);
    let detector = ProfanityDetector::from_scorers(vec![
        entry(Locale::English, english),
        entry(Locale::Spanish, spanish),
    ])
    .unwrap();

    let preds = detector.predictions("x");
    assert_eq!(preds.len(), 2);
    assert_eq!(preds[0].locale, Locale::English);
    assert!(!preds[0].prediction.is_profane);
    assert_eq!(preds[1].locale, Locale::Spanish);
    assert!(preds[1].prediction.is_profane);
}

#[test]
fn empty_scorer_set_is_rejected() {
    let result = ProfanityDetector::from_scorers(Vec::new());
    assert!(matches!(result.err(), Some(DetectorError::NoLocales)));
}

#[test]
fn empty_phrase_has_zero_probability() {
    let detector = foo_detector();
    assert_eq!(detector.phrase_profanity_probability(""), 0.0);
    assert_eq!(detector.phrase_profanity_probability(" \t\n "), 0.0);
    assert!(!detector.is_phrase_profane("   "));
}

#[test]
fn phrase_verdict_short_circuits() {
    let mock = std::sync::Arc::new(MockScorer::new(&[("foo", true, 0.9)], LOW));
    let detector =
        ProfanityDetector::from_scorers(vec![entry(Locale::English, Shared(mock.clone()))])
            .unwrap();

    assert!(detector.is_phrase_profane("foo and more words"));
    assert_eq!(mock.seen.lock().unwrap().len(), 1);
}

// ============================================================
// Aggregation laws
// ============================================================

fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

proptest! {
    #[test]
    fn adding_a_profane_locale_never_clears_verdict(
        word in word_strategy(),
        base_profane in any::<bool>(),
        base_p in 0.0f32..=1.0,
    ) {
        let base = MockScorer::new(&[], Prediction { is_profane: base_profane, probability: base_p });
        let flagging = MockScorer::new(&[], Prediction { is_profane: true, probability: 0.99 });
        let detector = ProfanityDetector::from_scorers(vec![
            entry(Locale::English, base),
            entry(Locale::Spanish, flagging),
        ]).unwrap();

        prop_assert!(detector.is_profane(&word));
    }

    #[test]
    fn word_probability_is_max_of_scorers(probs in proptest::collection::vec(0.0f32..=1.0, 1..4)) {
        let locales = [Locale::English, Locale::Spanish, Locale::Portuguese, Locale::RussianCyrillic];
        let scorers: Vec<(Locale, Box<dyn Scorer>)> = probs
            .iter()
            .zip(locales)
            .map(|(&p, locale)| {
                let scorer: Box<dyn Scorer> =
                    Box::new(MockScorer::new(&[], Prediction { is_profane: p >= 0.5, probability: p }));
                (locale, scorer)
            })
            .collect();
        let detector = ProfanityDetector::from_scorers(scorers).unwrap();

        let expected = probs.iter().copied().fold(0.0f32, f32::max);
        prop_assert_eq!(detector.profanity_probability("anything"), expected);
    }

    #[test]
    fn phrase_verdict_is_any_token(words in proptest::collection::vec(
        prop_oneof![Just("foo".to_string()), word_strategy()], 0..6)
    ) {
        let detector = foo_detector();
        let phrase = words.join("  ");
        let expected = phrase.split_whitespace().any(|t| detector.is_profane(t));
        prop_assert_eq!(detector.is_phrase_profane(&phrase), expected);
    }

    #[test]
    fn phrase_probability_is_max_token(words in proptest::collection::vec(
        prop_oneof![Just("foo".to_string()), word_strategy()], 0..6)
    ) {
        let detector = foo_detector();
        let phrase = words.join(" \t");
        let expected = phrase
            .split_whitespace()
            .map(|t| detector.profanity_probability(t))
            .fold(0.0f32, f32::max);
        prop_assert_eq!(detector.phrase_profanity_probability(&phrase), expected);
    }

    #[test]
    fn masking_preserves_tokens_and_lengths(words in proptest::collection::vec(
        prop_oneof![Just("foo".to_string()), Just("foo!".to_string()), word_strategy()], 0..6)
    ) {
        let detector = foo_detector();
        let phrase = words.join("   ");
        let masked = detector.mask_profanity(&phrase, '#');

        let original: Vec<&str> = phrase.split_whitespace().collect();
        let rendered: Vec<&str> = masked.split(' ').filter(|t| !t.is_empty()).collect();
        prop_assert_eq!(original.len(), rendered.len());

        for (orig, out) in original.iter().zip(&rendered) {
            if detector.is_profane(orig) {
                prop_assert_eq!(out.chars().count(), orig.chars().count());
                prop_assert!(out.chars().all(|c| c == '#'));
            } else {
                prop_assert_eq!(out, orig);
            }
        }
    }
}
