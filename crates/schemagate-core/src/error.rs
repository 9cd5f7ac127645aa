//! # Configuration Errors
//!
//! Errors raised while turning parsed command-line arguments into a
//! [`RunOptions`](crate::RunOptions). Runtime failures (schema loading,
//! compilation, payload parsing) live in the crates that own them.

use thiserror::Error;

/// Error building or interpreting run configuration.
#[derive(Error, Debug)]
pub enum OptionsError {
    /// A configured URL could not be parsed.
    #[error("invalid {field} '{value}': {reason}")]
    InvalidUrl {
        /// Name of the option holding the URL.
        field: &'static str,
        /// The rejected value.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The key scan limit must allow at least one key.
    #[error("key scan limit must be at least 1")]
    ZeroKeyScanLimit,
}
