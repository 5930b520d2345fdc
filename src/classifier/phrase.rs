// Phrase-level classification: split on whitespace, classify each token,
// fold the answers back together.

use serde::Serialize;

use super::word::{WordClassifier, WordVerdict};

/// Default character used by `mask_profanity`.
pub const DEFAULT_MASK_CHAR: char = '*';

/// Split a phrase into tokens. Runs of whitespace collapse and empty tokens
/// are dropped.
pub fn tokenize(phrase: &str) -> impl Iterator<Item = &str> {
    phrase.split_whitespace()
}

/// Per-token breakdown of a phrase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhraseAnalysis {
    pub tokens: Vec<WordVerdict>,
    pub is_profane: bool,
    /// Highest token probability, 0.0 for a phrase without tokens
    pub probability: f32,
}

impl PhraseAnalysis {
    pub fn profane_tokens(&self) -> impl Iterator<Item = &WordVerdict> {
        self.tokens.iter().filter(|t| t.is_profane)
    }
}

/// Phrase operations layered over a word classifier.
#[derive(Clone, Copy)]
pub struct PhraseClassifier<'a> {
    words: &'a WordClassifier,
}

impl<'a> PhraseClassifier<'a> {
    pub fn new(words: &'a WordClassifier) -> Self {
        Self { words }
    }

    /// True as soon as one token is profane.
    pub fn is_phrase_profane(&self, phrase: &str) -> bool {
        tokenize(phrase).any(|token| self.words.is_profane(token))
    }

    /// Highest per-token probability; 0.0 when the phrase has no tokens.
    pub fn phrase_profanity_probability(&self, phrase: &str) -> f32 {
        tokenize(phrase)
            .map(|token| self.words.profanity_probability(token))
            .fold(0.0, f32::max)
    }

    /// Replace each profane token with `mask_char` repeated once per character
    /// of the original token. Tokens are rejoined with single spaces, so the
    /// phrase's original spacing is not kept.
    pub fn mask_profanity(&self, phrase: &str, mask_char: char) -> String {
        tokenize(phrase)
            .map(|token| {
                if self.words.is_profane(token) {
                    mask_token(token, mask_char)
                } else {
                    token.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Classify every token without short-circuiting.
    pub fn analyze(&self, phrase: &str) -> PhraseAnalysis {
        let tokens: Vec<WordVerdict> = tokenize(phrase)
            .map(|token| self.words.classify(token))
            .collect();

        PhraseAnalysis {
            is_profane: tokens.iter().any(|t| t.is_profane),
            probability: tokens.iter().map(|t| t.probability).fold(0.0, f32::max),
            tokens,
        }
    }
}

fn mask_token(token: &str, mask_char: char) -> String {
    mask_char.to_string().repeat(token.chars().count())
}
