//! Single-use orchestration of one verb group.
//!
//! ```text
//! Start -> SyntaxSelected -> Tokenized -> Resolving -> Validated -> Done
//! ```
//!
//! Every step returns `Result`; the first error ends the run and becomes a
//! failed [`ParsingResult`]. A pipeline is consumed by [`run`](ParsingPipeline::run).

use argot_core::{OptionSpec, Verb};
use argot_suggest::{AutoCorrector, SuggestionEngine};
use tracing::{debug, warn};

use crate::args::{FromArgs, ParsedArgs, ParsingResult};
use crate::config::ParserConfig;
use crate::convert::convert;
use crate::error::ParseError;
use crate::rules;
use crate::tokenizer::{
    NaturalTokenizer, ParsedValues, StandardTokenizer, Syntax, Tokenizer, select_syntax,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Start,
    SyntaxSelected,
    Tokenized,
    Resolving,
    Validated,
    Done,
}

/// Parses one argv group (verb first) against one [`Verb`].
#[derive(Debug)]
pub struct ParsingPipeline<'a> {
    verb: &'a Verb,
    config: &'a ParserConfig,
    corrector: AutoCorrector,
    stage: Stage,
}

impl<'a> ParsingPipeline<'a> {
    pub fn new(verb: &'a Verb, config: &'a ParserConfig) -> Self {
        let engine = SuggestionEngine::new(config.suggestions.clone());
        Self {
            verb,
            config,
            corrector: AutoCorrector::new(engine),
            stage: Stage::Start,
        }
    }

    /// Runs every stage and binds the resolved values to `T`.
    pub fn run<T: FromArgs>(mut self, argv: &[String]) -> ParsingResult<T> {
        let outcome = self.execute(argv);
        if let Err(error) = &outcome {
            debug!(
                verb = self.verb.long_name(),
                stage = ?self.stage,
                error = %error,
                "Parse failed"
            );
        }
        outcome.into()
    }

    fn advance(&mut self, next: Stage) {
        debug!(verb = self.verb.long_name(), from = ?self.stage, to = ?next, "Pipeline stage");
        self.stage = next;
    }

    fn execute<T: FromArgs>(&mut self, argv: &[String]) -> Result<T, ParseError> {
        self.check_verb(argv)?;
        let syntax = select_syntax(argv)?;
        self.advance(Stage::SyntaxSelected);

        let values = self.tokenizer(syntax).tokenize(argv)?;
        self.advance(Stage::Tokenized);

        self.advance(Stage::Resolving);
        let args = self.resolve(&values)?;
        self.advance(Stage::Validated);

        let instance = T::from_args(&args)?;
        self.advance(Stage::Done);
        Ok(instance)
    }

    fn check_verb(&self, argv: &[String]) -> Result<(), ParseError> {
        let Some(first) = argv.first() else {
            return Err(ParseError::BadFormat("no verb given".to_string()));
        };
        if self.verb.matches(first) {
            return Ok(());
        }
        Err(ParseError::UnknownVerb {
            input: first.clone(),
            suggestions: self.corrector.engine().suggest_verb(first, self.verb),
        })
    }

    fn tokenizer(&self, syntax: Syntax) -> Box<dyn Tokenizer> {
        match syntax {
            Syntax::Standard => Box::new(StandardTokenizer::new(
                &self.config.long_prefix,
                &self.config.short_prefix,
            )),
            Syntax::Natural => Box::new(NaturalTokenizer),
        }
    }

    fn resolve(&mut self, values: &ParsedValues) -> Result<ParsedArgs, ParseError> {
        let verb = self.verb;
        let options = verb.options();
        let unknown: Vec<&str> = values
            .names()
            .filter(|name| verb.find_option(name).is_none())
            .collect();
        for name in &unknown {
            warn!(verb = verb.long_name(), option = %name, "Ignoring unknown option");
        }

        let mut args = ParsedArgs::new(verb.long_name());
        for option in options {
            match values.find_any(option.names()) {
                Some((given, raw)) => {
                    rules::validate(options, option, values)?;
                    let value = convert(raw, option.kind(), option.long_name())
                        .map_err(|err| with_custom_message(option, err))?;
                    debug!(option = option.long_name(), given, value = %value, "Resolved option");
                    args.insert(option.long_name(), option.kind(), value);
                }
                None if option.is_required() => {
                    return Err(self.missing_required(option, &unknown));
                }
                None => {
                    if let Some(default) = option.default_value() {
                        args.insert(option.long_name(), option.kind(), default.clone());
                    }
                }
            }
        }

        Ok(args)
    }

    fn missing_required(&mut self, option: &OptionSpec, unknown: &[&str]) -> ParseError {
        let mut message = match option.error_message() {
            Some(custom) => custom.to_string(),
            None => format!("required option '{}' is missing", option.long_name()),
        };

        let hint = unknown.iter().find_map(|name| {
            self.corrector
                .try_correct_option(name, std::slice::from_ref(option))
                .map(|correction| (*name, correction.suggestion))
        });
        if let Some((given, suggestion)) = hint {
            message.push_str(&format!(". '{given}' was given; did you mean '{suggestion}'?"));
        }

        ParseError::MissingRequired {
            name: option.long_name().to_string(),
            message,
        }
    }
}

fn with_custom_message(option: &OptionSpec, error: ParseError) -> ParseError {
    match (error, option.error_message()) {
        (ParseError::InvalidValue { option: name, .. }, Some(custom)) => ParseError::InvalidValue {
            option: name,
            message: custom.to_string(),
        },
        (error, _) => error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argot_core::{SettingsRule, Value, ValueKind};

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn verb() -> Verb {
        Verb::builder("add")
            .short('a')
            .option(
                OptionSpec::builder("count", ValueKind::Integer)
                    .short('c')
                    .required()
                    .error_message("count must be a whole number")
                    .settings(SettingsRule::range(Some(0), Some(20)).unwrap())
                    .build()
                    .unwrap(),
            )
            .option(
                OptionSpec::builder("mode", ValueKind::String)
                    .default_value("fast")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    fn run(argv: &[String]) -> ParsingResult<ParsedArgs> {
        let verb = verb();
        let config = ParserConfig::default();
        ParsingPipeline::new(&verb, &config).run(argv)
    }

    #[test]
    fn test_short_verb_name_and_default() {
        let result = run(&argv(&["a", "-c", "3"]));
        let args = result.into_instance().unwrap();
        assert_eq!(args.get_integer("count"), Some(3));
        assert_eq!(args.get("mode"), Some(&Value::from("fast")));
    }

    #[test]
    fn test_empty_argv_is_bad_format() {
        let result = run(&[]);
        assert_eq!(result.error().map(ParseError::kind), Some(crate::ErrorKind::BadFormat));
    }

    #[test]
    fn test_unknown_verb_suggests_close_name() {
        let result = run(&argv(&["ad", "--count", "1"]));
        assert_eq!(
            result.error(),
            Some(&ParseError::UnknownVerb {
                input: "ad".to_string(),
                suggestions: vec!["add".to_string(), "a".to_string()],
            })
        );
    }

    #[test]
    fn test_custom_error_message_replaces_conversion_message() {
        let verb = Verb::builder("add")
            .option(
                OptionSpec::builder("count", ValueKind::Integer)
                    .error_message("count must be a whole number")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let config = ParserConfig::default();
        let result: ParsingResult<ParsedArgs> =
            ParsingPipeline::new(&verb, &config).run(&argv(&["add", "--count", "many"]));
        assert_eq!(
            result.error_message().as_deref(),
            Some("count must be a whole number")
        );
    }

    #[test]
    fn test_missing_required_hints_at_misspelled_name() {
        let result = run(&argv(&["add", "--cuont", "3"]));
        let err = result.error().unwrap();
        assert_eq!(err.kind(), crate::ErrorKind::MissingRequired);
        assert_eq!(
            err.to_string(),
            "count must be a whole number. 'cuont' was given; did you mean 'count'?"
        );
    }

    #[test]
    fn test_settings_checked_before_conversion() {
        let result = run(&argv(&["add", "--count", "25"]));
        assert_eq!(
            result.error().map(ParseError::kind),
            Some(crate::ErrorKind::SettingsViolation)
        );
    }
}
