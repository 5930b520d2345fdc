// Per-locale scorers: trait-based abstraction over the model runtime.
//
// The Scorer trait is what the classifiers see. OnnxScorer runs a local ONNX
// model; LexiconScorer looks words up in a plain-text list. BackendFactory
// picks one based on configuration and resolves model files through a
// ModelStore, so there is no global model registry.

pub mod download;
pub mod lexicon;
pub mod onnx;
pub mod traits;

use std::path::{Path, PathBuf};

use crate::config::ScorerBackend;
use crate::error::DetectorError;
use crate::locale::Locale;

use self::traits::{Scorer, ScorerFactory};

/// Resolves locale resource keys to files inside a model directory.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
    namespace: String,
}

impl ModelStore {
    pub fn new(dir: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            namespace: namespace.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<namespace>.<locale>.model`
    pub fn model_key(&self, locale: Locale) -> String {
        locale.model_key(&self.namespace)
    }

    /// `<namespace>.<locale>.tokenizer.json`
    pub fn tokenizer_key(&self, locale: Locale) -> String {
        format!("{}.{}.tokenizer.json", self.namespace, locale.display_name())
    }

    pub fn model_path(&self, locale: Locale) -> PathBuf {
        self.dir.join(self.model_key(locale))
    }

    pub fn tokenizer_path(&self, locale: Locale) -> PathBuf {
        self.dir.join(self.tokenizer_key(locale))
    }

    /// Files the given backend needs for `locale`.
    pub fn required_files(&self, backend: &ScorerBackend, locale: Locale) -> Vec<String> {
        match backend {
            ScorerBackend::Onnx => vec![self.model_key(locale), self.tokenizer_key(locale)],
            ScorerBackend::Lexicon => vec![self.model_key(locale)],
        }
    }

    /// Check whether every file the backend needs for `locale` exists.
    pub fn files_present(&self, backend: &ScorerBackend, locale: Locale) -> bool {
        self.required_files(backend, locale)
            .iter()
            .all(|file| self.dir.join(file).exists())
    }
}

/// Loads scorers from a model directory using the configured backend.
#[derive(Debug, Clone)]
pub struct BackendFactory {
    pub store: ModelStore,
    pub backend: ScorerBackend,
    pub threshold: f32,
}

impl ScorerFactory for BackendFactory {
    fn load(&self, locale: Locale) -> Result<Box<dyn Scorer>, DetectorError> {
        match self.backend {
            ScorerBackend::Onnx => Ok(Box::new(onnx::OnnxScorer::load(
                &self.store,
                locale,
                self.threshold,
            )?)),
            ScorerBackend::Lexicon => Ok(Box::new(lexicon::LexiconScorer::load(
                &self.store,
                locale,
                self.threshold,
            )?)),
        }
    }
}
