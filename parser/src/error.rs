//! Error types for parsing and parser configuration.

use argot_core::MutualKind;
use argot_suggest::format_hint;
use serde::Serialize;
use thiserror::Error;

/// Category of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Structural violation of the expected syntax, including an unknown verb.
    BadFormat,
    /// A required option had no value.
    MissingRequired,
    /// A value could not be converted to its declared type.
    InvalidValue,
    /// An inclusive or exclusive rule was broken.
    MutualViolation,
    /// A range, pattern or allowed-value constraint was broken.
    SettingsViolation,
    /// The schema itself is unusable; a caller bug rather than bad input.
    IllegalOperation,
}

/// First failure encountered while parsing one verb group.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("bad format: {0}")]
    BadFormat(String),

    /// The first token names no known verb.
    #[error("unknown verb '{input}'{}", format_hint(.suggestions))]
    UnknownVerb {
        input: String,
        suggestions: Vec<String>,
    },

    #[error("{message}")]
    MissingRequired { name: String, message: String },

    #[error("{message}")]
    InvalidValue { option: String, message: String },

    #[error("{}", mutual_message(.option, .related, .kind))]
    MutualViolation {
        option: String,
        related: String,
        kind: MutualKind,
    },

    #[error("{message}")]
    SettingsViolation { option: String, message: String },

    #[error("illegal operation: {0}")]
    IllegalOperation(String),
}

fn mutual_message(option: &str, related: &str, kind: &MutualKind) -> String {
    match kind {
        MutualKind::Inclusive => format!(
            "options '{option}' and '{related}' are mutually inclusive and must be given together"
        ),
        MutualKind::Exclusive => format!(
            "options '{option}' and '{related}' are mutually exclusive and cannot be given together"
        ),
    }
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadFormat(_) | Self::UnknownVerb { .. } => ErrorKind::BadFormat,
            Self::MissingRequired { .. } => ErrorKind::MissingRequired,
            Self::InvalidValue { .. } => ErrorKind::InvalidValue,
            Self::MutualViolation { .. } => ErrorKind::MutualViolation,
            Self::SettingsViolation { .. } => ErrorKind::SettingsViolation,
            Self::IllegalOperation(_) => ErrorKind::IllegalOperation,
        }
    }
}

/// Errors that can occur while loading or saving a [`ParserConfig`](crate::ParserConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Values that parse but cannot drive a parser (e.g. empty prefixes).
    #[error("invalid parser config: {0}")]
    Invalid(String),
}
