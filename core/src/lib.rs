//! Core schema types for the argot argument parser.
//!
//! This crate defines the grammar a caller parses argv against:
//!
//! - [`Verb`] — a top-level command with short/long names, aliases and the
//!   options it owns.
//! - [`OptionSpec`] — a named, typed parameter with optional default,
//!   [`MutualRule`]s and a [`SettingsRule`].
//! - [`MutualRule`] — inclusive/exclusive relationships between sibling
//!   options, referenced by name.
//! - [`SettingsRule`] — numeric range, regex and allowed-value constraints.
//! - [`SchemaDocument`] — the same grammar as YAML or JSON data.
//!
//! Builders validate at construction ([`validate_verb`], [`validate_option`]),
//! so every value handed to the parser is already well-formed.
//!
//! # Example
//!
//! ```
//! use argot_core::*;
//!
//! let add = Verb::builder("add")
//!     .short('a')
//!     .option(
//!         OptionSpec::builder("read", ValueKind::String)
//!             .short('r')
//!             .required()
//!             .build()
//!             .unwrap(),
//!     )
//!     .option(
//!         OptionSpec::builder("count", ValueKind::Integer)
//!             .settings(SettingsRule::range(Some(0), Some(20)).unwrap())
//!             .build()
//!             .unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert!(add.matches("a"));
//! assert_eq!(add.find_option("r").unwrap().long_name(), "read");
//! ```

mod document;
mod types;
mod validate;

pub use document::{
    DocumentError, OptionDef, SCHEMA_DOCUMENT_VERSION, SchemaDocument, SettingsDef, VerbDef,
};
pub use types::*;
pub use validate::{MIN_VERB_NAME_LEN, SchemaError, validate_option, validate_verb};
