//! Splitting argv into option name / raw value pairs.
//!
//! Two syntaxes are supported:
//!
//! - **standard**: `add --read notes.txt -v true`
//! - **natural**: `add where read is notes.txt and verbose is true`
//!
//! [`select_syntax`] decides which one applies to a given argv.

use argot_core::is_reserved_keyword;

use crate::error::ParseError;

const WHERE: &str = "where";
const IS: &str = "is";
const AND: &str = "and";

/// Input syntax of one verb group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Standard,
    Natural,
}

/// Chooses the syntax of `argv` (verb first).
///
/// Without any reserved keyword the standard syntax applies. With one, the
/// second token must be `where`; anything else is a format error.
///
/// # Examples
///
/// ```
/// use argot_parser::{Syntax, select_syntax};
///
/// let standard: Vec<String> = ["add", "--read", "a.txt"].map(String::from).to_vec();
/// assert_eq!(select_syntax(&standard).unwrap(), Syntax::Standard);
///
/// let natural: Vec<String> = ["add", "WHERE", "read", "is", "a.txt"].map(String::from).to_vec();
/// assert_eq!(select_syntax(&natural).unwrap(), Syntax::Natural);
///
/// let misplaced: Vec<String> = ["add", "read", "is", "a.txt"].map(String::from).to_vec();
/// assert!(select_syntax(&misplaced).is_err());
/// ```
pub fn select_syntax(argv: &[String]) -> Result<Syntax, ParseError> {
    if !argv.iter().any(|token| is_reserved_keyword(token)) {
        return Ok(Syntax::Standard);
    }
    if argv
        .get(1)
        .is_some_and(|token| token.eq_ignore_ascii_case(WHERE))
    {
        return Ok(Syntax::Natural);
    }
    Err(ParseError::BadFormat(format!(
        "reserved keyword found, but '{WHERE}' must directly follow the verb"
    )))
}

/// Option names mapped to their raw values, in input order.
///
/// Names compare case-insensitively. A name given twice keeps its last
/// value but its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedValues {
    entries: Vec<(String, String)>,
}

impl ParsedValues {
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Value of the first name in `names` that was given, with that name.
    pub fn find_any<'n>(
        &self,
        names: impl IntoIterator<Item = &'n str>,
    ) -> Option<(&'n str, &str)> {
        names
            .into_iter()
            .find_map(|name| self.get(name).map(|value| (name, value)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Splits one verb group into named raw values.
pub trait Tokenizer {
    fn syntax(&self) -> Syntax;
    fn tokenize(&self, argv: &[String]) -> Result<ParsedValues, ParseError>;
}

/// `--name value words` / `-n value` syntax.
///
/// Every token up to the next prefixed token belongs to the preceding
/// option's value, joined by single spaces. Tokens before the first option
/// (the verb) are ignored.
///
/// # Examples
///
/// ```
/// use argot_parser::{StandardTokenizer, Tokenizer};
///
/// let argv: Vec<String> = ["add", "--title", "hello", "world", "-v", "true"]
///     .map(String::from)
///     .to_vec();
/// let values = StandardTokenizer::default().tokenize(&argv).unwrap();
/// assert_eq!(values.get("title"), Some("hello world"));
/// assert_eq!(values.get("v"), Some("true"));
/// ```
#[derive(Debug, Clone)]
pub struct StandardTokenizer {
    long_prefix: String,
    short_prefix: String,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_LONG_PREFIX,
            crate::config::DEFAULT_SHORT_PREFIX,
        )
    }
}

impl StandardTokenizer {
    pub fn new(long_prefix: &str, short_prefix: &str) -> Self {
        Self {
            long_prefix: long_prefix.to_string(),
            short_prefix: short_prefix.to_string(),
        }
    }

    fn option_name<'t>(&self, token: &'t str) -> Option<&'t str> {
        token
            .strip_prefix(self.long_prefix.as_str())
            .or_else(|| token.strip_prefix(self.short_prefix.as_str()))
            .filter(|name| !name.is_empty())
    }
}

impl Tokenizer for StandardTokenizer {
    fn syntax(&self) -> Syntax {
        Syntax::Standard
    }

    fn tokenize(&self, argv: &[String]) -> Result<ParsedValues, ParseError> {
        let mut values = ParsedValues::default();
        let mut current: Option<(&str, Vec<&str>)> = None;

        for token in argv {
            if let Some(name) = self.option_name(token) {
                if let Some((name, parts)) = current.take() {
                    values.insert(name, parts.join(" "));
                }
                current = Some((name, Vec::new()));
            } else if let Some((_, parts)) = current.as_mut() {
                parts.push(token);
            }
        }
        if let Some((name, parts)) = current {
            values.insert(name, parts.join(" "));
        }

        Ok(values)
    }
}

/// `where name is value [and] name is value` syntax.
///
/// A value runs until the token before the next `is` (the next name), so
/// multi-word values need no quoting. A trailing `and` is dropped.
///
/// # Examples
///
/// ```
/// use argot_parser::{NaturalTokenizer, Tokenizer};
///
/// let argv: Vec<String> = ["add", "where", "title", "is", "hello", "world", "and", "count", "is", "3"]
///     .map(String::from)
///     .to_vec();
/// let values = NaturalTokenizer.tokenize(&argv).unwrap();
/// assert_eq!(values.get("title"), Some("hello world"));
/// assert_eq!(values.get("count"), Some("3"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalTokenizer;

impl Tokenizer for NaturalTokenizer {
    fn syntax(&self) -> Syntax {
        Syntax::Natural
    }

    fn tokenize(&self, argv: &[String]) -> Result<ParsedValues, ParseError> {
        let where_index = argv
            .iter()
            .position(|token| token.eq_ignore_ascii_case(WHERE))
            .filter(|&index| index > 0)
            .ok_or_else(|| {
                ParseError::BadFormat(format!(
                    "natural syntax requires '{WHERE}' after the verb"
                ))
            })?;

        let tokens = &argv[where_index + 1..];
        let is_keyword = |index: usize| {
            tokens
                .get(index)
                .is_some_and(|token| token.eq_ignore_ascii_case(IS))
        };

        let mut values = ParsedValues::default();
        let mut index = 0;
        while index < tokens.len() {
            let name = tokens[index].as_str();
            if name.eq_ignore_ascii_case(AND) {
                index += 1;
                continue;
            }
            if is_reserved_keyword(name) {
                return Err(ParseError::BadFormat(format!(
                    "expected an option name, found keyword '{name}'"
                )));
            }
            if !is_keyword(index + 1) {
                return Err(ParseError::BadFormat(format!(
                    "expected '{IS}' after '{name}'"
                )));
            }

            let start = index + 2;
            let mut end = (start + 1).min(tokens.len());
            while end < tokens.len() && !is_keyword(end + 1) {
                end += 1;
            }

            let mut parts = &tokens[start.min(tokens.len())..end];
            while let [rest @ .., last] = parts {
                if !last.eq_ignore_ascii_case(AND) {
                    break;
                }
                parts = rest;
            }
            values.insert(name, parts.join(" "));
            index = end;
        }

        Ok(values)
    }
}
