// The public entry point: a detector over a fixed set of locales.
//
// Construction loads one scorer per requested locale through a ScorerFactory.
// The first locale that fails to load aborts construction; there is no
// partially loaded detector. Once built, the scorer set never changes and all
// operations take &self, so a detector can be shared across threads.

use tracing::info;

use crate::classifier::phrase::{PhraseAnalysis, PhraseClassifier, DEFAULT_MASK_CHAR};
use crate::classifier::word::{LocalePrediction, LocaleScorer, WordClassifier, WordVerdict};
use crate::config::Config;
use crate::error::Result;
use crate::locale::Locale;
use crate::scorer::traits::{Scorer, ScorerFactory};

/// Multi-locale profanity detector.
pub struct ProfanityDetector {
    words: WordClassifier,
}

impl ProfanityDetector {
    /// Detector for the default locale (English).
    pub fn new(factory: &impl ScorerFactory) -> Result<Self> {
        Self::with_locales(&[Locale::default()], factory)
    }

    /// Detector for the default bundle (English, Spanish, Portuguese).
    pub fn with_all_locales(factory: &impl ScorerFactory) -> Result<Self> {
        Self::with_locales(&Locale::DEFAULT_BUNDLE, factory)
    }

    /// Detector for an explicit locale list. Repeated locales load once.
    pub fn with_locales(locales: &[Locale], factory: &impl ScorerFactory) -> Result<Self> {
        let mut scorers: Vec<LocaleScorer> = Vec::with_capacity(locales.len());
        for &locale in locales {
            if scorers.iter().any(|s| s.locale == locale) {
                continue;
            }
            let scorer = factory.load(locale)?;
            scorers.push(LocaleScorer::new(locale, scorer));
        }

        let detector = Self {
            words: WordClassifier::new(scorers)?,
        };
        info!(
            locales = %detector.locales().map(|l| l.to_string()).collect::<Vec<_>>().join(","),
            "Profanity detector ready"
        );
        Ok(detector)
    }

    /// Detector for the locales and backend selected in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_locales(&config.selected_locales(), &config.scorer_factory())
    }

    /// Detector over scorers that are already loaded.
    pub fn from_scorers(scorers: Vec<(Locale, Box<dyn Scorer>)>) -> Result<Self> {
        let scorers = scorers
            .into_iter()
            .map(|(locale, scorer)| LocaleScorer::new(locale, scorer))
            .collect();
        Ok(Self {
            words: WordClassifier::new(scorers)?,
        })
    }

    /// Active locales in load order.
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        self.words.locales()
    }

    fn phrases(&self) -> PhraseClassifier<'_> {
        PhraseClassifier::new(&self.words)
    }

    /// Whether any active locale considers `word` profane.
    pub fn is_profane(&self, word: &str) -> bool {
        self.words.is_profane(word)
    }

    /// Highest probability any active locale assigns to `word`, 0.0 to 1.0.
    pub fn profanity_probability(&self, word: &str) -> f32 {
        self.words.profanity_probability(word)
    }

    /// Per-locale predictions for `word`.
    pub fn predictions(&self, word: &str) -> Vec<LocalePrediction> {
        self.words.predictions(word)
    }

    /// Verdict and probability for `word` in one pass.
    pub fn classify(&self, word: &str) -> WordVerdict {
        self.words.classify(word)
    }

    /// Whether any whitespace-separated token of `phrase` is profane.
    pub fn is_phrase_profane(&self, phrase: &str) -> bool {
        self.phrases().is_phrase_profane(phrase)
    }

    /// Highest token probability in `phrase`; 0.0 if it has no tokens.
    pub fn phrase_profanity_probability(&self, phrase: &str) -> f32 {
        self.phrases().phrase_profanity_probability(phrase)
    }

    /// `phrase` with each profane token replaced by `mask_char`s.
    pub fn mask_profanity(&self, phrase: &str, mask_char: char) -> String {
        self.phrases().mask_profanity(phrase, mask_char)
    }

    /// `mask_profanity` with `*`.
    pub fn mask(&self, phrase: &str) -> String {
        self.mask_profanity(phrase, DEFAULT_MASK_CHAR)
    }

    /// Token-by-token breakdown of `phrase`.
    pub fn analyze_phrase(&self, phrase: &str) -> PhraseAnalysis {
        self.phrases().analyze(phrase)
    }
}
