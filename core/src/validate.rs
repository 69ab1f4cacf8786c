//! Schema validation.
//!
//! Validates structural invariants of verbs and options, catching empty or
//! too-short names, collisions with reserved keywords, duplicate option
//! names, and defaults of the wrong type before a schema is ever parsed
//! against. The builders in [`crate::types`] call these functions, so a
//! constructed [`Verb`] is always valid.
//!
//! # Examples
//!
//! ```
//! use argot_core::*;
//!
//! let ok = Verb::builder("add")
//!     .option(OptionSpec::builder("read", ValueKind::String).build().unwrap())
//!     .build();
//! assert!(ok.is_ok());
//!
//! // Invalid: option named after a reserved keyword
//! let bad = OptionSpec::builder("where", ValueKind::String).build();
//! assert_eq!(bad.unwrap_err(), SchemaError::ReservedName("where".into()));
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{OptionSpec, ValueKind, Verb, is_reserved_keyword};

/// Minimum length of a verb's long name.
pub const MIN_VERB_NAME_LEN: usize = 2;

/// Schema validation errors.
///
/// Each variant indicates a bug in the caller's schema rather than bad user
/// input. The `Display` impl provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Option long name is empty or whitespace-only.
    #[error("option long name cannot be empty")]
    EmptyOptionName,
    /// Verb long name is shorter than [`MIN_VERB_NAME_LEN`] after trimming.
    #[error("verb long name must have at least {MIN_VERB_NAME_LEN} characters: {0:?}")]
    InvalidVerbName(String),
    /// Short name is a whitespace character.
    #[error("short name cannot be whitespace: {0:?}")]
    InvalidShortName(char),
    /// A verb or option name collides with `where`, `is` or `and`.
    #[error("name collides with a reserved keyword: {0}")]
    ReservedName(String),
    /// Two options of the same verb share a long name, short name or alias.
    #[error("duplicate option name in verb: {0}")]
    DuplicateOption(String),
    /// Settings range with `min > max`.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },
    /// Default value does not have the option's declared type.
    #[error("default value of option {option} is {found}, expected {expected}")]
    DefaultKindMismatch {
        option: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Validates a single option.
///
/// Checks for an empty long name, reserved-keyword collisions, and a default
/// value whose type differs from the declared kind.
///
/// # Examples
///
/// ```
/// use argot_core::*;
///
/// let err = OptionSpec::builder("count", ValueKind::Integer)
///     .default_value("ten")
///     .build()
///     .unwrap_err();
/// assert!(matches!(err, SchemaError::DefaultKindMismatch { .. }));
/// ```
pub fn validate_option(option: &OptionSpec) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    if option.long_name().trim().is_empty() {
        errors.push(SchemaError::EmptyOptionName);
        return errors;
    }

    if let Some(reserved) = option.names().find(|name| is_reserved_keyword(name)) {
        errors.push(SchemaError::ReservedName(reserved.to_string()));
        return errors;
    }

    if let Some(default) = option.default_value() {
        if default.kind() != option.kind() {
            errors.push(SchemaError::DefaultKindMismatch {
                option: option.long_name().to_string(),
                expected: option.kind(),
                found: default.kind(),
            });
            return errors;
        }
    }

    errors
}

/// Validates a verb and every option it owns.
///
/// Checks the verb name, reserved-keyword collisions, each option, and
/// duplicate names across the verb's options (case-insensitive).
///
/// # Examples
///
/// ```
/// use argot_core::*;
///
/// let err = Verb::builder("add")
///     .option(OptionSpec::builder("read", ValueKind::String).short('r').build().unwrap())
///     .option(OptionSpec::builder("recurse", ValueKind::Bool).short('r').build().unwrap())
///     .build()
///     .unwrap_err();
/// assert_eq!(err, SchemaError::DuplicateOption("r".into()));
/// ```
pub fn validate_verb(verb: &Verb) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    let name = verb.long_name().trim();
    if name.chars().count() < MIN_VERB_NAME_LEN {
        errors.push(SchemaError::InvalidVerbName(name.to_string()));
        return errors;
    }

    if let Some(reserved) = verb.names().find(|name| is_reserved_keyword(name)) {
        errors.push(SchemaError::ReservedName(reserved.to_string()));
        return errors;
    }

    errors.extend(validate_options(verb.options()));
    errors
}

fn validate_options(options: &[OptionSpec]) -> Vec<SchemaError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for option in options {
        errors.extend(validate_option(option));
        if !errors.is_empty() {
            return errors;
        }

        for name in option.names() {
            if !seen.insert(name.to_lowercase()) {
                errors.push(SchemaError::DuplicateOption(name.to_string()));
                return errors;
            }
        }
    }

    errors
}
