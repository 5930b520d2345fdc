// Construction-time errors for the detector.
//
// Classification calls never fail: a scorer fault during prediction is logged
// and degraded (see classifier::word). Everything that can go wrong happens
// while loading scorers, and all of it is fatal for the detector being built.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a detector or its scorers.
#[derive(Debug, Error)]
pub enum DetectorError {
    /// The locale's model resource exists but could not be read or deserialized.
    #[error("failed to load model '{key}' from {path}: {source}")]
    ModelLoad {
        key: String,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// No model resource exists for this locale, or the name is not a known locale.
    #[error("unsupported locale '{locale}': {reason}")]
    UnsupportedLocale { locale: String, reason: String },

    /// A detector needs at least one locale.
    #[error("no locales requested; a detector needs at least one scorer")]
    NoLocales,

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias for detector construction.
pub type Result<T> = std::result::Result<T, DetectorError>;
