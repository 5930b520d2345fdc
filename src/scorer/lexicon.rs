// Word-list scorer.
//
// The locale's `<namespace>.<locale>.model` file is read as plain text:
//
//   # comment
//   damn
//   crap<TAB>0.6
//
// A bare word scores 1.0. Entries go through the same normalization as the
// words being scored, so `coño` is stored as `coo`. Lookups are
// case-insensitive. Words not in the list score 0.0. Useful where ONNX Runtime
// isn't available and for curated lists.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, warn};

use super::traits::{Prediction, Scorer};
use super::ModelStore;
use crate::error::DetectorError;
use crate::locale::Locale;
use crate::normalize::normalize;

/// Scorer backed by an in-memory word → probability table.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    entries: HashMap<String, f32>,
    threshold: f32,
}

impl LexiconScorer {
    /// Build a scorer from already-parsed entries.
    ///
    /// Words are keyed by their normalized, lowercased form. Entries with
    /// nothing left after normalization are dropped. When two entries collapse
    /// to the same key the higher probability wins.
    pub fn from_entries<I, S>(entries: I, threshold: f32) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: AsRef<str>,
    {
        let mut table: HashMap<String, f32> = HashMap::new();
        for (word, p) in entries {
            let key = entry_key(word.as_ref());
            if key.is_empty() {
                continue;
            }
            let p = p.clamp(0.0, 1.0);
            table
                .entry(key)
                .and_modify(|existing| *existing = existing.max(p))
                .or_insert(p);
        }
        Self {
            entries: table,
            threshold,
        }
    }

    /// Load the word list for `locale` from `store`.
    pub fn load(store: &ModelStore, locale: Locale, threshold: f32) -> Result<Self, DetectorError> {
        let path = store.model_path(locale);
        if !path.exists() {
            return Err(DetectorError::UnsupportedLocale {
                locale: locale.to_string(),
                reason: format!("word list not found: {}", path.display()),
            });
        }

        let scorer = Self::load_file(&path, threshold).map_err(|source| {
            DetectorError::ModelLoad {
                key: store.model_key(locale),
                path: path.clone(),
                source,
            }
        })?;

        info!(%locale, words = scorer.len(), "Loaded word list");
        Ok(scorer)
    }

    fn load_file(path: &Path, threshold: f32) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let entries = parse_entries(&text)?;
        Ok(Self::from_entries(entries, threshold))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Scorer for LexiconScorer {
    fn predict(&self, normalized_word: &str) -> Result<Prediction> {
        let probability = self
            .entries
            .get(&normalized_word.to_lowercase())
            .copied()
            .unwrap_or(0.0);
        let prediction = Prediction::from_probability(probability, self.threshold);
        debug!(
            probability = prediction.probability,
            word = %crate::output::truncate_chars(normalized_word, 32),
            "Lexicon scored word"
        );
        Ok(prediction)
    }
}

/// Parse word-list text into (normalized word, probability) pairs.
fn parse_entries(text: &str) -> Result<Vec<(String, f32)>> {
    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (word, probability) = match line.split_once('\t') {
            Some((word, raw)) => {
                let p: f32 = raw.trim().parse().map_err(|_| {
                    anyhow::anyhow!("line {}: invalid probability '{}'", index + 1, raw.trim())
                })?;
                if !(0.0..=1.0).contains(&p) {
                    anyhow::bail!("line {}: probability {} outside [0, 1]", index + 1, p);
                }
                (word.trim(), p)
            }
            None => (line, 1.0),
        };

        if word.is_empty() {
            continue;
        }
        let key = entry_key(word);
        if key.is_empty() {
            warn!(
                line = index + 1,
                word = %word,
                "Word list entry has no characters the scorer can see, skipping"
            );
            continue;
        }
        entries.push((key, probability));
    }
    Ok(entries)
}

/// Lookup key for a list entry: the form a scorer receives, lowercased.
fn entry_key(word: &str) -> String {
    normalize(word).trim().to_lowercase()
}
