//! Parse output: resolved values, typed binding, and the result wrapper.

use std::fmt;

use argot_core::{Value, ValueKind};
use serde::Serialize;

use crate::error::ParseError;

/// One resolved option: canonical long name, declared kind, and value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedOption {
    pub name: String,
    pub kind: ValueKind,
    pub value: Value,
}

/// Values resolved for one verb group, keyed by option long name.
///
/// Only options that were given or have a default appear.
///
/// # Examples
///
/// ```
/// use argot_core::{Value, ValueKind};
/// use argot_parser::ParsedArgs;
///
/// let mut args = ParsedArgs::new("add");
/// args.insert("count", ValueKind::Integer, Value::Integer(10));
///
/// assert_eq!(args.get_integer("COUNT"), Some(10));
/// assert_eq!(args.get_str("count"), None);
/// assert_eq!(args.to_string(), "add\n  count (integer) = 10");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedArgs {
    verb: String,
    options: Vec<ParsedOption>,
}

impl ParsedArgs {
    pub fn new(verb: impl Into<String>) -> Self {
        Self {
            verb: verb.into(),
            options: Vec::new(),
        }
    }

    /// Long name of the verb these values belong to.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Stores a value, replacing any earlier value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, kind: ValueKind, value: Value) {
        let name = name.into();
        match self
            .options
            .iter_mut()
            .find(|option| option.name.eq_ignore_ascii_case(&name))
        {
            Some(existing) => {
                existing.kind = kind;
                existing.value = value;
            }
            None => self.options.push(ParsedOption { name, kind, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.options
            .iter()
            .find(|option| option.name.eq_ignore_ascii_case(name))
            .map(|option| &option.value)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_integer)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns the value of `name`, failing if it was never resolved.
    ///
    /// Meant for [`FromArgs`] implementations binding a field that the
    /// schema declares required or defaulted.
    pub fn require(&self, name: &str) -> Result<&Value, ParseError> {
        self.get(name).ok_or_else(|| {
            ParseError::IllegalOperation(format!(
                "no value resolved for option '{name}' of verb '{}'",
                self.verb
            ))
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParsedOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl fmt::Display for ParsedArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.verb)?;
        for option in &self.options {
            write!(f, "\n  {} ({}) = {}", option.name, option.kind, option.value)?;
        }
        Ok(())
    }
}

/// Binds resolved values to a caller's type.
///
/// # Examples
///
/// ```
/// use argot_parser::{FromArgs, ParseError, ParsedArgs};
///
/// struct Add {
///     read: String,
///     verbose: bool,
/// }
///
/// impl FromArgs for Add {
///     fn from_args(args: &ParsedArgs) -> Result<Self, ParseError> {
///         Ok(Self {
///             read: args.get_str("read").unwrap_or_default().to_string(),
///             verbose: args.get_bool("verbose").unwrap_or(false),
///         })
///     }
/// }
/// ```
pub trait FromArgs: Sized {
    fn from_args(args: &ParsedArgs) -> Result<Self, ParseError>;
}

impl FromArgs for ParsedArgs {
    fn from_args(args: &ParsedArgs) -> Result<Self, ParseError> {
        Ok(args.clone())
    }
}

/// Outcome of one parse call: the bound instance or the first failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsingResult<T> {
    outcome: Result<T, ParseError>,
}

impl<T> ParsingResult<T> {
    pub fn success(instance: T) -> Self {
        Self {
            outcome: Ok(instance),
        }
    }

    pub fn failure(error: ParseError) -> Self {
        Self {
            outcome: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&ParseError> {
        self.outcome.as_ref().err()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }

    pub fn instance(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }

    pub fn into_instance(self) -> Option<T> {
        self.outcome.ok()
    }

    pub fn into_result(self) -> Result<T, ParseError> {
        self.outcome
    }
}

impl<T> From<Result<T, ParseError>> for ParsingResult<T> {
    fn from(outcome: Result<T, ParseError>) -> Self {
        Self { outcome }
    }
}

impl<T: fmt::Display> fmt::Display for ParsingResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(instance) => instance.fmt(f),
            Err(error) => write!(f, "error: {error}"),
        }
    }
}
