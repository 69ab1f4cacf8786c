//! Serializable schema documents.
//!
//! A [`SchemaDocument`] describes a set of verbs in YAML or JSON so that a
//! host can ship its grammar as data. Converting a document with
//! [`SchemaDocument::verbs`] runs the same builders and validation as
//! constructing the schema in code.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! verbs:
//!   - name: add
//!     short: a
//!     options:
//!       - name: read
//!         kind: string
//!         required: true
//!       - name: count
//!         kind: integer
//!         default: 1
//!         settings: { min: 0, max: 20 }
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    MutualRule, OptionSpec, SchemaError, SettingsRule, Value, ValueKind, Verb,
};

/// Version of the schema document format.
pub const SCHEMA_DOCUMENT_VERSION: &str = "1.0";

/// Errors that can occur while loading a schema document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Document version string is empty.
    #[error("document version cannot be empty")]
    EmptyVersion,

    /// The document parsed but describes an invalid schema.
    #[error("invalid schema in verb {verb}: {source}")]
    Schema {
        verb: String,
        #[source]
        source: SchemaError,
    },
}

/// Range, pattern and allowed-value constraints of an [`OptionDef`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDef {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub pattern: Option<String>,
    pub pattern_message: Option<String>,
    pub allowed: Vec<String>,
}

/// Serializable description of an option.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionDef {
    pub name: String,
    pub short: Option<char>,
    pub kind: ValueKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    pub help: Option<String>,
    pub error_message: Option<String>,
    pub aliases: Vec<String>,
    /// Options that must be present together with this one.
    pub inclusive: Vec<String>,
    /// Options that must not be present together with this one.
    pub exclusive: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsDef>,
}

/// Serializable description of a verb.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerbDef {
    pub name: String,
    pub short: Option<char>,
    pub required: bool,
    pub help: Option<String>,
    pub error_message: Option<String>,
    pub aliases: Vec<String>,
    pub options: Vec<OptionDef>,
}

/// A versioned set of verb definitions.
///
/// # Examples
///
/// ```
/// use argot_core::SchemaDocument;
///
/// let yaml = r#"
/// version: "1.0"
/// verbs:
///   - name: add
///     options:
///       - name: read
///         kind: string
///       - name: verbose
///         kind: bool
///         default: false
/// "#;
///
/// let document = SchemaDocument::from_yaml_str(yaml).unwrap();
/// let verbs = document.verbs().unwrap();
/// assert_eq!(verbs[0].long_name(), "add");
/// assert_eq!(verbs[0].option_names(), vec!["read", "verbose"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Document format version (see [`SCHEMA_DOCUMENT_VERSION`]).
    pub version: String,
    pub verbs: Vec<VerbDef>,
}

impl SchemaDocument {
    pub fn new(verbs: Vec<VerbDef>) -> Self {
        Self {
            version: SCHEMA_DOCUMENT_VERSION.to_string(),
            verbs,
        }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a document from disk. Files ending in `.json` are read as JSON,
    /// everything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] if the file cannot be read, or a
    /// [`Json`](DocumentError::Json)/[`Yaml`](DocumentError::Yaml) error if
    /// parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let reader = BufReader::new(std::fs::File::open(path)?);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_reader(reader)?)
        } else {
            Ok(serde_yaml::from_reader(reader)?)
        }
    }

    /// Builds and validates every verb in the document.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::EmptyVersion`] for a blank version string and
    /// [`DocumentError::Schema`] for the first verb that fails validation.
    pub fn verbs(&self) -> Result<Vec<Verb>, DocumentError> {
        if self.version.trim().is_empty() {
            return Err(DocumentError::EmptyVersion);
        }
        self.verbs
            .iter()
            .map(|def| {
                Verb::try_from(def).map_err(|source| DocumentError::Schema {
                    verb: def.name.clone(),
                    source,
                })
            })
            .collect()
    }
}

impl TryFrom<&SettingsDef> for SettingsRule {
    type Error = SchemaError;

    fn try_from(def: &SettingsDef) -> Result<Self, Self::Error> {
        let mut rule = SettingsRule::range(def.min, def.max)?;
        if let Some(pattern) = &def.pattern {
            rule = rule.with_pattern(pattern.as_str(), def.pattern_message.as_deref());
        }
        if !def.allowed.is_empty() {
            rule = rule.with_allowed_values(def.allowed.iter().cloned());
        }
        Ok(rule)
    }
}

impl TryFrom<&OptionDef> for OptionSpec {
    type Error = SchemaError;

    fn try_from(def: &OptionDef) -> Result<Self, Self::Error> {
        let mut builder = OptionSpec::builder(def.name.as_str(), def.kind)
            .aliases(def.aliases.iter().cloned());
        if let Some(short) = def.short {
            builder = builder.short(short);
        }
        if def.required {
            builder = builder.required();
        }
        if let Some(default) = &def.default {
            // YAML has no float literal for whole numbers.
            let default = match (def.kind, default) {
                (ValueKind::Float, Value::Integer(n)) => Value::Float(*n as f64),
                _ => default.clone(),
            };
            builder = builder.default_value(default);
        }
        if let Some(help) = &def.help {
            builder = builder.help(help);
        }
        if let Some(message) = &def.error_message {
            builder = builder.error_message(message);
        }
        if !def.inclusive.is_empty() {
            builder = builder.mutual(MutualRule::inclusive(def.inclusive.iter().cloned()));
        }
        if !def.exclusive.is_empty() {
            builder = builder.mutual(MutualRule::exclusive(def.exclusive.iter().cloned()));
        }
        if let Some(settings) = &def.settings {
            builder = builder.settings(SettingsRule::try_from(settings)?);
        }
        builder.build()
    }
}

impl TryFrom<&VerbDef> for Verb {
    type Error = SchemaError;

    fn try_from(def: &VerbDef) -> Result<Self, Self::Error> {
        let options = def
            .options
            .iter()
            .map(OptionSpec::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = Verb::builder(def.name.as_str())
            .aliases(def.aliases.iter().cloned())
            .options(options);
        if let Some(short) = def.short {
            builder = builder.short(short);
        }
        if def.required {
            builder = builder.required();
        }
        if let Some(help) = &def.help {
            builder = builder.help(help);
        }
        if let Some(message) = &def.error_message {
            builder = builder.error_message(message);
        }
        builder.build()
    }
}
