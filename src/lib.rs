// badword: multi-locale profanity detection
//
// This is the library root. A ProfanityDetector loads one scorer per locale
// and answers word and phrase questions by aggregating across them.

pub mod classifier;
pub mod config;
pub mod detector;
pub mod error;
pub mod locale;
pub mod normalize;
pub mod output;
pub mod scorer;

pub use detector::ProfanityDetector;
pub use error::DetectorError;
pub use locale::Locale;
pub use scorer::traits::{Prediction, Scorer, ScorerFactory};
