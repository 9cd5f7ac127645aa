//! # Key-Case Verdicts
//!
//! The dominant key-naming convention observed in a payload. Produced by the
//! detector in `schemagate-schema` and compared against the expectation in
//! [`RunOptions`](crate::RunOptions). Never persisted.

use std::fmt;

use serde::Serialize;

/// Key-naming convention verdict.
///
/// The variants are mutually exclusive. `Unknown` doubles as "no
/// expectation" when used as the configured expected case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCase {
    /// `camelCase` keys.
    Camel,
    /// `snake_case` keys.
    Snake,
    /// `dash-case` keys.
    Dash,
    /// No recognizable convention, or nothing to inspect.
    #[default]
    Unknown,
}

impl KeyCase {
    /// Lowercase name used on the command line and in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Camel => "camel",
            Self::Snake => "snake",
            Self::Dash => "dash",
            Self::Unknown => "unknown",
        }
    }

    /// Returns true for every verdict except `Unknown`.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Whether `detected` contradicts this expectation.
    ///
    /// Only a known expectation and a known detection can disagree; an
    /// `Unknown` on either side never produces a mismatch.
    pub fn mismatches(&self, detected: KeyCase) -> bool {
        self.is_known() && detected.is_known() && *self != detected
    }
}

impl fmt::Display for KeyCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
