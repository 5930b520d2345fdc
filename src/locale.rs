// Locale tags and their canonical display names.
//
// A locale is only ever used as a key: its display name goes into the model
// resource key `<namespace>.<name>.model` that a scorer factory resolves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DetectorError;

/// Default namespace for model resource keys.
pub const DEFAULT_NAMESPACE: &str = "badword";

/// Languages with a trained profanity model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    English,
    Spanish,
    Portuguese,
    RussianCyrillic,
}

impl Locale {
    /// Every known locale, in declaration order.
    pub const ALL: [Locale; 4] = [
        Locale::English,
        Locale::Spanish,
        Locale::Portuguese,
        Locale::RussianCyrillic,
    ];

    /// Locales loaded when the "all locales" flag is set.
    pub const DEFAULT_BUNDLE: [Locale; 3] = [Locale::English, Locale::Spanish, Locale::Portuguese];

    /// Canonical lowercase name used in resource keys.
    pub fn display_name(self) -> &'static str {
        match self {
            Locale::English => "english",
            Locale::Spanish => "spanish",
            Locale::Portuguese => "portuguese",
            Locale::RussianCyrillic => "russian_cyrillic",
        }
    }

    /// Resource key for this locale's model, e.g. `badword.english.model`.
    pub fn model_key(self, namespace: &str) -> String {
        format!("{namespace}.{}.model", self.display_name())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Locale {
    type Err = DetectorError;

    /// Accepts display names case-insensitively, with `-` or `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Locale::ALL
            .into_iter()
            .find(|locale| locale.display_name() == wanted)
            .ok_or_else(|| DetectorError::UnsupportedLocale {
                locale: s.to_string(),
                reason: format!(
                    "expected one of: {}",
                    Locale::ALL.map(Locale::display_name).join(", ")
                ),
            })
    }
}

/// Parse a comma-separated locale list such as `english,spanish`.
/// Blank entries are skipped.
pub fn parse_locale_list(list: &str) -> Result<Vec<Locale>, DetectorError> {
    list.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(Locale::from_str)
        .collect()
}
