//! Schema type definitions for verbs and their options.
//!
//! This module defines the grammar a caller parses against: a [`Verb`] owns a
//! collection of [`OptionSpec`]s, each of which may carry [`MutualRule`]s and
//! a [`SettingsRule`]. Values are built through builders that normalise and
//! validate their input, so a constructed schema is immutable and well-formed.

use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validate::{SchemaError, validate_option, validate_verb};

/// Keywords reserved by the natural-language syntax.
///
/// Matched case-insensitively. Verb and option names must not collide with
/// any of them.
pub const RESERVED_KEYWORDS: [&str; 3] = ["where", "is", "and"];

/// Returns `true` if `token` is one of the [`RESERVED_KEYWORDS`].
///
/// # Examples
///
/// ```
/// use argot_core::is_reserved_keyword;
///
/// assert!(is_reserved_keyword("WHERE"));
/// assert!(is_reserved_keyword("is"));
/// assert!(!is_reserved_keyword("island"));
/// ```
pub fn is_reserved_keyword(token: &str) -> bool {
    RESERVED_KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(token))
}

/// Declared target type of an option.
///
/// # Examples
///
/// ```
/// use argot_core::ValueKind;
///
/// assert_eq!(ValueKind::default(), ValueKind::String);
/// assert_eq!(ValueKind::Integer.to_string(), "integer");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// `true` / `false`, case-insensitive.
    Bool,
    /// Whole number; fractional input is truncated.
    Integer,
    /// Floating point number.
    Float,
    /// Free text (the default).
    #[default]
    String,
}

impl ValueKind {
    /// Lowercase label used in messages and diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed option value.
///
/// # Examples
///
/// ```
/// use argot_core::{Value, ValueKind};
///
/// let count = Value::from(10);
/// assert_eq!(count.kind(), ValueKind::Integer);
/// assert_eq!(count.as_integer(), Some(10));
/// assert_eq!(Value::from("notes.txt").as_str(), Some("notes.txt"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    /// Returns the [`ValueKind`] this value belongs to.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Bool(_) => ValueKind::Bool,
            Self::Integer(_) => ValueKind::Integer,
            Self::Float(_) => ValueKind::Float,
            Self::String(_) => ValueKind::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Kind of relationship a [`MutualRule`] enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutualKind {
    /// Related options must be present together or all absent.
    Inclusive,
    /// At most one of the pair may be present.
    Exclusive,
}

impl fmt::Display for MutualKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inclusive => f.write_str("inclusive"),
            Self::Exclusive => f.write_str("exclusive"),
        }
    }
}

/// Relationship between one option and a set of sibling options named by
/// string.
///
/// Related names are resolved against the owning verb's options at
/// validation time, so options that name each other never hold references
/// to one another.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use argot_core::{MutualKind, MutualRule};
///
/// let rule = MutualRule::exclusive(["quiet"]);
/// assert_eq!(rule.kind(), MutualKind::Exclusive);
/// assert_eq!(rule.related(), ["quiet".to_string()]);
///
/// let names: Arc<[String]> = Arc::from(vec!["read".to_string()]);
/// let shared = MutualRule::shared(MutualKind::Inclusive, Arc::clone(&names));
/// assert!(shared.shares(&names));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutualRule {
    kind: MutualKind,
    related: Arc<[String]>,
}

impl MutualRule {
    /// Creates a rule over a copy of `related`.
    pub fn new<I, S>(kind: MutualKind, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            related: related.into_iter().map(Into::into).collect(),
        }
    }

    pub fn inclusive<I, S>(related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MutualKind::Inclusive, related)
    }

    pub fn exclusive<I, S>(related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MutualKind::Exclusive, related)
    }

    /// Creates a rule that shares the caller's name list instead of copying it.
    pub fn shared(kind: MutualKind, related: Arc<[String]>) -> Self {
        Self { kind, related }
    }

    pub fn kind(&self) -> MutualKind {
        self.kind
    }

    pub fn related(&self) -> &[String] {
        &self.related
    }

    /// Returns `true` if this rule aliases the given allocation.
    pub fn shares(&self, related: &Arc<[String]>) -> bool {
        Arc::ptr_eq(&self.related, related)
    }
}

/// Constraints applied to an option's raw value.
///
/// The regex pattern is compiled lazily on first use and cached; concurrent
/// first uses race benignly, with one compiled value winning.
///
/// # Examples
///
/// ```
/// use argot_core::SettingsRule;
///
/// let rule = SettingsRule::range(Some(0), Some(20)).unwrap();
/// assert_eq!(rule.bounds(), Some((0, 20)));
///
/// assert!(SettingsRule::range(Some(5), Some(1)).is_err());
///
/// let rule = SettingsRule::default().with_pattern(r"^\d{3}$", Some("three digits"));
/// assert!(rule.pattern_regex().unwrap().unwrap().is_match("123"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingsRule {
    min: Option<i64>,
    max: Option<i64>,
    pattern: Option<String>,
    pattern_message: Option<String>,
    compiled: OnceLock<Regex>,
    allowed: Vec<String>,
}

impl SettingsRule {
    /// Creates a rule with a numeric range. `None` leaves a bound unset.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidRange`] when both bounds are set and
    /// `min > max`.
    pub fn range(min: Option<i64>, max: Option<i64>) -> Result<Self, SchemaError> {
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(SchemaError::InvalidRange { min: lo, max: hi });
            }
        }
        Ok(Self {
            min,
            max,
            ..Default::default()
        })
    }

    /// Adds a regex the raw value must match, with an optional failure message.
    pub fn with_pattern(mut self, pattern: impl Into<String>, message: Option<&str>) -> Self {
        self.pattern = Some(pattern.into());
        self.pattern_message = message.map(String::from);
        self.compiled = OnceLock::new();
        self
    }

    /// Restricts the value to a set of allowed strings (copied).
    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn min(&self) -> Option<i64> {
        self.min
    }

    pub fn max(&self) -> Option<i64> {
        self.max
    }

    /// Both bounds, only when both are set.
    pub fn bounds(&self) -> Option<(i64, i64)> {
        self.min.zip(self.max)
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn pattern_message(&self) -> Option<&str> {
        self.pattern_message.as_deref()
    }

    pub fn allowed_values(&self) -> &[String] {
        &self.allowed
    }

    /// Returns the compiled pattern, compiling and caching it on first call.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error if the pattern is invalid. Failed
    /// compilations are not cached.
    pub fn pattern_regex(&self) -> Result<Option<&Regex>, regex::Error> {
        let Some(pattern) = self.pattern.as_deref() else {
            return Ok(None);
        };
        if let Some(regex) = self.compiled.get() {
            return Ok(Some(regex));
        }
        let regex = Regex::new(pattern)?;
        Ok(Some(self.compiled.get_or_init(|| regex)))
    }
}

/// Trims, drops entries shorter than two characters, and removes
/// case-insensitive duplicates while preserving the first spelling.
fn normalize_aliases(aliases: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(aliases.len());
    for alias in aliases {
        let alias = alias.trim();
        if alias.chars().count() < 2 {
            continue;
        }
        if kept.iter().any(|seen| seen.eq_ignore_ascii_case(alias)) {
            continue;
        }
        kept.push(alias.to_string());
    }
    kept
}

fn name_matches(names: impl IntoIterator<Item = impl AsRef<str>>, query: &str) -> bool {
    names
        .into_iter()
        .any(|name| name.as_ref().eq_ignore_ascii_case(query))
}

/// A named, typed parameter of a [`Verb`].
///
/// # Examples
///
/// ```
/// use argot_core::{OptionSpec, ValueKind};
///
/// let read = OptionSpec::builder("read", ValueKind::String)
///     .short('r')
///     .aliases(["input", " in ", "x", "INPUT"])
///     .required()
///     .build()
///     .unwrap();
///
/// assert_eq!(read.long_name(), "read");
/// assert_eq!(read.short_name(), Some("r"));
/// assert_eq!(read.aliases(), ["input".to_string(), "in".to_string()]);
/// assert!(read.matches("IN"));
/// ```
#[derive(Debug, Clone)]
pub struct OptionSpec {
    long_name: String,
    short_name: Option<String>,
    kind: ValueKind,
    required: bool,
    default: Option<Value>,
    help: Option<String>,
    error_message: Option<String>,
    aliases: Vec<String>,
    mutual_rules: Vec<MutualRule>,
    settings: Option<SettingsRule>,
}

impl OptionSpec {
    pub fn builder(long_name: impl Into<String>, kind: ValueKind) -> OptionBuilder {
        OptionBuilder {
            spec: Self {
                long_name: long_name.into(),
                short_name: None,
                kind,
                required: false,
                default: None,
                help: None,
                error_message: None,
                aliases: Vec::new(),
                mutual_rules: Vec::new(),
                settings: None,
            },
            short: None,
            aliases: Vec::new(),
        }
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn mutual_rules(&self) -> &[MutualRule] {
        &self.mutual_rules
    }

    pub fn settings(&self) -> Option<&SettingsRule> {
        self.settings.as_ref()
    }

    /// Every name this option answers to: long, short, then aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.long_name.as_str())
            .chain(self.short_name.as_deref())
            .chain(self.aliases.iter().map(String::as_str))
    }

    /// Case-insensitive match against any of [`names`](Self::names).
    pub fn matches(&self, name: &str) -> bool {
        name_matches(self.names(), name)
    }
}

/// Builder for [`OptionSpec`].
#[derive(Debug, Clone)]
pub struct OptionBuilder {
    spec: OptionSpec,
    short: Option<char>,
    aliases: Vec<String>,
}

impl OptionBuilder {
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn required(mut self) -> Self {
        self.spec.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.spec.default = Some(value.into());
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.spec.help = Some(help.to_string());
        self
    }

    pub fn error_message(mut self, message: &str) -> Self {
        self.spec.error_message = Some(message.to_string());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn mutual(mut self, rule: MutualRule) -> Self {
        self.spec.mutual_rules.push(rule);
        self
    }

    pub fn settings(mut self, rule: SettingsRule) -> Self {
        self.spec.settings = Some(rule);
        self
    }

    /// Normalises names and aliases, then validates the option.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] reported by [`validate_option`].
    pub fn build(self) -> Result<OptionSpec, SchemaError> {
        let Self {
            mut spec,
            short,
            aliases,
        } = self;
        if let Some(short) = short {
            if short.is_whitespace() {
                return Err(SchemaError::InvalidShortName(short));
            }
            spec.short_name = Some(short.to_string());
        }
        spec.long_name = spec.long_name.trim().to_string();
        spec.aliases = normalize_aliases(aliases);

        match validate_option(&spec).into_iter().next() {
            Some(error) => Err(error),
            None => Ok(spec),
        }
    }
}

/// A top-level command and the options it accepts.
///
/// # Examples
///
/// ```
/// use argot_core::{OptionSpec, Verb, ValueKind};
///
/// let add = Verb::builder("add")
///     .short('a')
///     .alias("append")
///     .option(OptionSpec::builder("read", ValueKind::String).build().unwrap())
///     .option(OptionSpec::builder("count", ValueKind::Integer).build().unwrap())
///     .build()
///     .unwrap();
///
/// assert!(add.matches("APPEND"));
/// assert!(add.find_option("count").is_some());
/// assert_eq!(add.option_names(), vec!["read", "count"]);
/// ```
#[derive(Debug, Clone)]
pub struct Verb {
    long_name: String,
    short_name: Option<String>,
    required: bool,
    help: Option<String>,
    error_message: Option<String>,
    aliases: Vec<String>,
    options: Vec<OptionSpec>,
}

impl Verb {
    pub fn builder(long_name: impl Into<String>) -> VerbBuilder {
        VerbBuilder {
            verb: Self {
                long_name: long_name.into(),
                short_name: None,
                required: false,
                help: None,
                error_message: None,
                aliases: Vec::new(),
                options: Vec::new(),
            },
            short: None,
            aliases: Vec::new(),
        }
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn options(&self) -> &[OptionSpec] {
        &self.options
    }

    /// Every name this verb answers to: long, short, then aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.long_name.as_str())
            .chain(self.short_name.as_deref())
            .chain(self.aliases.iter().map(String::as_str))
    }

    /// Case-insensitive match against any of [`names`](Self::names).
    pub fn matches(&self, name: &str) -> bool {
        name_matches(self.names(), name)
    }

    /// Finds an option by long name, short name, or alias.
    pub fn find_option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|option| option.matches(name))
    }

    /// Long names of all options, in declaration order.
    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(OptionSpec::long_name).collect()
    }
}

/// Builder for [`Verb`].
#[derive(Debug, Clone)]
pub struct VerbBuilder {
    verb: Verb,
    short: Option<char>,
    aliases: Vec<String>,
}

impl VerbBuilder {
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn required(mut self) -> Self {
        self.verb.required = true;
        self
    }

    pub fn help(mut self, help: &str) -> Self {
        self.verb.help = Some(help.to_string());
        self
    }

    pub fn error_message(mut self, message: &str) -> Self {
        self.verb.error_message = Some(message.to_string());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.verb.options.push(option);
        self
    }

    pub fn options(mut self, options: impl IntoIterator<Item = OptionSpec>) -> Self {
        self.verb.options.extend(options);
        self
    }

    /// Normalises names and aliases, then validates the verb and its options.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] reported by [`validate_verb`].
    pub fn build(self) -> Result<Verb, SchemaError> {
        let Self {
            mut verb,
            short,
            aliases,
        } = self;
        if let Some(short) = short {
            if short.is_whitespace() {
                return Err(SchemaError::InvalidShortName(short));
            }
            verb.short_name = Some(short.to_string());
        }
        verb.long_name = verb.long_name.trim().to_string();
        verb.aliases = normalize_aliases(aliases);

        match validate_verb(&verb).into_iter().next() {
            Some(error) => Err(error),
            None => Ok(verb),
        }
    }
}
