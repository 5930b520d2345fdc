use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::error::DetectorError;
use crate::locale::{self, Locale, DEFAULT_NAMESPACE};
use crate::scorer::{BackendFactory, ModelStore};

/// Which scorer backend to load per locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ScorerBackend {
    /// Local ONNX model (default): model graph + tokenizer per locale
    #[default]
    Onnx,
    /// Plain-text word list per locale
    Lexicon,
}

/// Default probability at or above which a word counts as profane.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. CLI flags
/// override the locale and backend choices after loading.
#[derive(Debug, Clone)]
pub struct Config {
    /// Locales to load, in request order
    pub locales: Vec<Locale>,
    /// Load the fixed default bundle instead of `locales`
    pub all_locales: bool,
    pub scorer_backend: ScorerBackend,
    /// Directory containing the per-locale model files
    pub model_dir: PathBuf,
    /// Namespace prefix of model resource keys
    pub namespace: String,
    pub threshold: f32,
    /// Base URL for `download-model` (no default)
    pub model_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales: vec![Locale::default()],
            all_locales: false,
            scorer_backend: ScorerBackend::default(),
            model_dir: crate::scorer::download::default_model_dir(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            threshold: DEFAULT_THRESHOLD,
            model_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except BADWORD_MODEL_URL, which only
    /// `download-model` needs.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let locales = match env::var("BADWORD_LOCALES") {
            Ok(list) => locale::parse_locale_list(&list)?,
            Err(_) => defaults.locales,
        };

        let all_locales = env::var("BADWORD_ALL_LOCALES")
            .map(|raw| parse_flag(&raw))
            .unwrap_or(defaults.all_locales);

        let scorer_backend = match env::var("BADWORD_SCORER") {
            Ok(raw) if !raw.trim().is_empty() => parse_scorer_backend(&raw)?,
            _ => defaults.scorer_backend,
        };

        let threshold = match env::var("BADWORD_THRESHOLD") {
            Ok(raw) => parse_threshold(&raw)?,
            Err(_) => defaults.threshold,
        };

        Ok(Self {
            locales,
            all_locales,
            scorer_backend,
            model_dir: env::var("BADWORD_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
            namespace: env::var("BADWORD_NAMESPACE").unwrap_or(defaults.namespace),
            threshold,
            model_url: env::var("BADWORD_MODEL_URL").ok().filter(|u| !u.is_empty()),
        })
    }

    /// The locales a detector built from this config will load.
    pub fn selected_locales(&self) -> Vec<Locale> {
        if self.all_locales {
            Locale::DEFAULT_BUNDLE.to_vec()
        } else {
            self.locales.clone()
        }
    }

    pub fn model_store(&self) -> ModelStore {
        ModelStore::new(&self.model_dir, &self.namespace)
    }

    /// Scorer factory for the configured backend and model directory.
    pub fn scorer_factory(&self) -> BackendFactory {
        BackendFactory {
            store: self.model_store(),
            backend: self.scorer_backend.clone(),
            threshold: self.threshold,
        }
    }

    /// Check that every selected locale has its model files on disk.
    /// Call this before building a detector to get a friendlier message.
    pub fn require_models(&self) -> Result<()> {
        let store = self.model_store();
        let missing: Vec<String> = self
            .selected_locales()
            .into_iter()
            .filter(|&locale| !store.files_present(&self.scorer_backend, locale))
            .map(|locale| locale.to_string())
            .collect();

        if !missing.is_empty() {
            anyhow::bail!(
                "Model files for {} not found in {}\n\
                 Run `badword download-model` to download them.\n\
                 Or set BADWORD_MODEL_DIR to a directory that contains them.",
                missing.join(", "),
                self.model_dir.display()
            );
        }
        Ok(())
    }

    /// Check that a download URL is configured.
    pub fn require_model_url(&self) -> Result<&str> {
        match self.model_url.as_deref() {
            Some(url) => Ok(url),
            None => anyhow::bail!(
                "BADWORD_MODEL_URL not set. Add it to your .env file.\n\
                 It should point at a directory serving <namespace>.<locale>.model files."
            ),
        }
    }
}

/// Parse a threshold value; must be a number in (0, 1].
///
/// Zero is rejected: every word scores at least 0.0, so it would flag them all.
pub fn parse_threshold(raw: &str) -> Result<f32, DetectorError> {
    let invalid = || {
        DetectorError::Config(format!(
            "BADWORD_THRESHOLD must be a number greater than 0 and at most 1, got '{raw}'"
        ))
    };
    let value: f32 = raw.trim().parse().map_err(|_| invalid())?;
    if !(value > 0.0 && value <= 1.0) {
        return Err(invalid());
    }
    Ok(value)
}

/// Parse a scorer backend name (`onnx` or `lexicon`, any case).
pub fn parse_scorer_backend(raw: &str) -> Result<ScorerBackend, DetectorError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "onnx" => Ok(ScorerBackend::Onnx),
        "lexicon" => Ok(ScorerBackend::Lexicon),
        _ => Err(DetectorError::Config(format!(
            "BADWORD_SCORER must be 'onnx' or 'lexicon', got '{raw}'"
        ))),
    }
}

/// Boolean env flag: `1`, `true` or `yes` in any case. Anything else is off.
fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
