//! Parser configuration.
//!
//! Controls the option prefixes of the standard syntax, the token separating
//! verb groups, and suggestion tuning. Every field has a default, so a YAML
//! file only needs the keys it changes.
//!
//! # Example YAML
//!
//! ```yaml
//! long_prefix: "--"
//! short_prefix: "-"
//! group_separator: "&"
//! suggestions:
//!   min_score: 0.6
//!   prefix_boost: 0.15
//!   phonetic_boost: 0.2
//!   max_suggestions: 3
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use argot_suggest::SuggestionConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Prefix of long option names in the standard syntax.
pub const DEFAULT_LONG_PREFIX: &str = "--";

/// Prefix of short option names in the standard syntax.
pub const DEFAULT_SHORT_PREFIX: &str = "-";

/// Token separating verb groups in one argv.
pub const DEFAULT_GROUP_SEPARATOR: &str = "&";

/// Settings for a [`Parser`](crate::Parser).
///
/// # Examples
///
/// ```
/// use argot_parser::ParserConfig;
///
/// let config: ParserConfig = serde_yaml::from_str("long_prefix: '++'").unwrap();
/// assert_eq!(config.long_prefix, "++");
/// assert_eq!(config.short_prefix, "-");
/// assert_eq!(config.suggestions.max_suggestions, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub long_prefix: String,
    pub short_prefix: String,
    pub group_separator: String,
    pub suggestions: SuggestionConfig,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            long_prefix: DEFAULT_LONG_PREFIX.to_string(),
            short_prefix: DEFAULT_SHORT_PREFIX.to_string(),
            group_separator: DEFAULT_GROUP_SEPARATOR.to_string(),
            suggestions: SuggestionConfig::default(),
        }
    }
}

impl ParserConfig {
    /// Loads configuration from a YAML file and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if parsing fails, or [`ConfigError::Invalid`]
    /// if [`validate`](Self::validate) rejects the values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be written, or
    /// [`ConfigError::Yaml`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks that prefixes and separator are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.long_prefix.is_empty() || self.short_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "option prefixes cannot be empty".to_string(),
            ));
        }
        if self.long_prefix == self.short_prefix {
            return Err(ConfigError::Invalid(format!(
                "long and short prefix are both {:?}",
                self.long_prefix
            )));
        }
        if self.group_separator.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "group separator cannot be blank".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.suggestions.min_score) {
            return Err(ConfigError::Invalid(format!(
                "suggestion min_score {} is outside 0.0-1.0",
                self.suggestions.min_score
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert_eq!(config.long_prefix, "--");
        assert_eq!(config.short_prefix, "-");
        assert_eq!(config.group_separator, "&");
        assert_eq!(config.suggestions, SuggestionConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ParserConfig =
            serde_yaml::from_str("suggestions:\n  max_suggestions: 5\n").unwrap();
        assert_eq!(config.suggestions.max_suggestions, 5);
        assert_eq!(config.suggestions.min_score, 0.6);
        assert_eq!(config.group_separator, "&");
    }

    #[test]
    fn test_identical_prefixes_are_rejected() {
        let config = ParserConfig {
            long_prefix: "-".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");

        let original = ParserConfig {
            long_prefix: "//".to_string(),
            short_prefix: "/".to_string(),
            ..Default::default()
        };
        original.save(&path).unwrap();

        let loaded = ParserConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }
}
