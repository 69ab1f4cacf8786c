//! The [`Parser`] context: configuration plus verb selection and grouping.

use argot_core::Verb;
use argot_suggest::{AutoCorrector, SuggestionEngine};
use tracing::debug;

use crate::args::{FromArgs, ParsedArgs, ParsingResult};
use crate::config::ParserConfig;
use crate::error::{ConfigError, ParseError};
use crate::pipeline::ParsingPipeline;

/// Entry point for parsing argv against verbs.
///
/// Holds no state besides its configuration; every call builds a fresh
/// [`ParsingPipeline`].
///
/// # Examples
///
/// ```
/// use argot_core::{OptionSpec, ValueKind, Verb};
/// use argot_parser::Parser;
///
/// let verbs = vec![
///     Verb::builder("add")
///         .option(OptionSpec::builder("read", ValueKind::String).build().unwrap())
///         .build()
///         .unwrap(),
///     Verb::builder("list").build().unwrap(),
/// ];
///
/// let argv: Vec<String> = ["add", "--read", "a.txt", "&", "list"]
///     .map(String::from)
///     .to_vec();
///
/// let parser = Parser::default();
/// let results = parser.parse_groups(&verbs, &argv);
/// assert_eq!(results.len(), 2);
/// assert!(results.iter().all(|result| result.is_success()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Creates a parser after checking `config` with [`ParserConfig::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the prefixes or separator are
    /// unusable or a suggestion score is out of range.
    pub fn new(config: ParserConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses one group whose first token must name `verb`.
    pub fn parse<T: FromArgs>(&self, verb: &Verb, argv: &[String]) -> ParsingResult<T> {
        ParsingPipeline::new(verb, &self.config).run(argv)
    }

    /// Parses one group against whichever verb its first token names.
    ///
    /// An unmatched first token fails as [`ParseError::UnknownVerb`] carrying
    /// the closest verb name, if any.
    pub fn parse_any(&self, verbs: &[Verb], argv: &[String]) -> ParsingResult<ParsedArgs> {
        let Some(first) = argv.first() else {
            return ParsingResult::failure(ParseError::BadFormat("no verb given".to_string()));
        };
        if let Some(verb) = verbs.iter().find(|verb| verb.matches(first)) {
            return self.parse(verb, argv);
        }

        let mut corrector = AutoCorrector::new(SuggestionEngine::new(
            self.config.suggestions.clone(),
        ));
        let suggestions = corrector
            .try_correct_verb(first, verbs)
            .map(|correction| vec![correction.suggestion])
            .unwrap_or_default();
        debug!(input = %first, ?suggestions, "No verb matched");

        ParsingResult::failure(ParseError::UnknownVerb {
            input: first.clone(),
            suggestions,
        })
    }

    /// Splits argv on the group separator token, dropping empty groups.
    ///
    /// # Examples
    ///
    /// ```
    /// use argot_parser::Parser;
    ///
    /// let argv: Vec<String> = ["&", "add", "-v", "true", "&", "&", "list"]
    ///     .map(String::from)
    ///     .to_vec();
    /// let groups = Parser::default().split_groups(&argv);
    /// assert_eq!(groups.len(), 2);
    /// assert_eq!(groups[0][0], "add");
    /// assert_eq!(groups[1], ["list".to_string()]);
    /// ```
    pub fn split_groups<'v>(&self, argv: &'v [String]) -> Vec<&'v [String]> {
        argv.split(|token| *token == self.config.group_separator)
            .filter(|group| !group.is_empty())
            .collect()
    }

    /// Parses every group of `argv`, then reports each required verb that
    /// no group named.
    ///
    /// Results follow group order; missing required verbs are appended as
    /// [`ParseError::MissingRequired`] failures.
    pub fn parse_groups(&self, verbs: &[Verb], argv: &[String]) -> Vec<ParsingResult<ParsedArgs>> {
        let groups = self.split_groups(argv);
        let mut results: Vec<ParsingResult<ParsedArgs>> = groups
            .iter()
            .map(|group| self.parse_any(verbs, group))
            .collect();

        for verb in verbs.iter().filter(|verb| verb.is_required()) {
            let given = groups
                .iter()
                .any(|group| group.first().is_some_and(|first| verb.matches(first)));
            if given {
                continue;
            }
            let message = match verb.error_message() {
                Some(custom) => custom.to_string(),
                None => format!("required verb '{}' is missing", verb.long_name()),
            };
            results.push(ParsingResult::failure(ParseError::MissingRequired {
                name: verb.long_name().to_string(),
                message,
            }));
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn verbs() -> Vec<Verb> {
        vec![
            Verb::builder("add").build().unwrap(),
            Verb::builder("commit")
                .required()
                .error_message("nothing to commit")
                .build()
                .unwrap(),
        ]
    }

    #[test]
    fn test_parse_any_selects_verb_by_first_token() {
        let result = Parser::default().parse_any(&verbs(), &argv(&["COMMIT"]));
        assert_eq!(result.instance().map(ParsedArgs::verb), Some("commit"));
    }

    #[test]
    fn test_parse_any_unknown_verb_carries_correction() {
        let result = Parser::default().parse_any(&verbs(), &argv(&["comit"]));
        assert_eq!(
            result.error_message().as_deref(),
            Some("unknown verb 'comit'. Did you mean 'commit'?")
        );
    }

    #[test]
    fn test_parse_any_empty_group() {
        let result = Parser::default().parse_any(&verbs(), &[]);
        assert_eq!(result.error().map(ParseError::kind), Some(ErrorKind::BadFormat));
    }

    #[test]
    fn test_split_groups_custom_separator() {
        let config = ParserConfig {
            group_separator: "then".to_string(),
            ..Default::default()
        };
        let parser = Parser::new(config).unwrap();
        let args = argv(&["add", "&", "then", "commit"]);
        let groups = parser.split_groups(&args);
        assert_eq!(groups, vec![&args[0..2], &args[3..4]]);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ParserConfig {
            short_prefix: String::new(),
            ..Default::default()
        };
        assert!(matches!(Parser::new(config), Err(ConfigError::Invalid(_))));

        let config = ParserConfig {
            long_prefix: "-".to_string(),
            ..Default::default()
        };
        assert!(Parser::new(config).is_err());
    }

    #[test]
    fn test_parse_groups_reports_missing_required_verb() {
        let results = Parser::default().parse_groups(&verbs(), &argv(&["add"]));
        assert_eq!(results.len(), 2);
        assert!(results[0].is_success());
        assert_eq!(
            results[1].error(),
            Some(&ParseError::MissingRequired {
                name: "commit".to_string(),
                message: "nothing to commit".to_string(),
            })
        );
    }
}
