//! Session-scoped correction of mistyped verb and option names.

use std::collections::HashMap;

use argot_core::{OptionSpec, Verb};
use tracing::debug;

use crate::engine::SuggestionEngine;

/// An accepted correction: the schema entity and the name suggested for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Correction<'a, T> {
    pub target: &'a T,
    pub suggestion: String,
}

/// Wraps a [`SuggestionEngine`] and remembers every correction it made.
///
/// One corrector belongs to one parsing session; it is not shared between
/// threads.
///
/// # Examples
///
/// ```
/// use argot_core::Verb;
/// use argot_suggest::AutoCorrector;
///
/// let verbs = vec![Verb::builder("add").build().unwrap()];
/// let mut corrector = AutoCorrector::default();
///
/// let correction = corrector.try_correct_verb("ad", &verbs).unwrap();
/// assert_eq!(correction.suggestion, "add");
/// assert_eq!(corrector.verb_corrections()["ad"], "add");
/// assert!(corrector.has_any_corrections());
/// ```
#[derive(Debug, Default)]
pub struct AutoCorrector {
    engine: SuggestionEngine,
    verb_corrections: HashMap<String, String>,
    option_corrections: HashMap<String, String>,
}

impl AutoCorrector {
    pub fn new(engine: SuggestionEngine) -> Self {
        Self {
            engine,
            verb_corrections: HashMap::new(),
            option_corrections: HashMap::new(),
        }
    }

    pub fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }

    /// Returns the first verb whose long or short name is close to `invalid`.
    ///
    /// Verbs are tried in order; the first one with any suggestion wins and
    /// `invalid -> suggestion` is recorded.
    pub fn try_correct_verb<'v>(
        &mut self,
        invalid: &str,
        verbs: &'v [Verb],
    ) -> Option<Correction<'v, Verb>> {
        let (verb, suggestion) = verbs.iter().find_map(|verb| {
            self.engine
                .suggest_verb(invalid, verb)
                .into_iter()
                .next()
                .map(|suggestion| (verb, suggestion))
        })?;

        debug!(invalid, suggestion = %suggestion, "Recorded verb correction");
        self.verb_corrections
            .insert(invalid.to_string(), suggestion.clone());
        Some(Correction {
            target: verb,
            suggestion,
        })
    }

    /// Returns the first option with any name close to `invalid`.
    ///
    /// Each option is scored on its own name group, in declaration order.
    pub fn try_correct_option<'o>(
        &mut self,
        invalid: &str,
        options: &'o [OptionSpec],
    ) -> Option<Correction<'o, OptionSpec>> {
        let (option, suggestion) = options.iter().find_map(|option| {
            self.engine
                .suggest_options(invalid, std::slice::from_ref(option))
                .into_iter()
                .next()
                .map(|suggestion| (option, suggestion))
        })?;

        debug!(invalid, suggestion = %suggestion, "Recorded option correction");
        self.option_corrections
            .insert(invalid.to_string(), suggestion.clone());
        Some(Correction {
            target: option,
            suggestion,
        })
    }

    pub fn verb_corrections(&self) -> &HashMap<String, String> {
        &self.verb_corrections
    }

    pub fn option_corrections(&self) -> &HashMap<String, String> {
        &self.option_corrections
    }

    pub fn has_any_corrections(&self) -> bool {
        !self.verb_corrections.is_empty() || !self.option_corrections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argot_core::ValueKind;

    fn options() -> Vec<OptionSpec> {
        vec![
            OptionSpec::builder("verbose", ValueKind::Bool)
                .short('v')
                .build()
                .unwrap(),
            OptionSpec::builder("count", ValueKind::Integer)
                .alias("number")
                .build()
                .unwrap(),
        ]
    }

    #[test]
    fn test_option_correction_returns_owner_long_name() {
        let options = options();
        let mut corrector = AutoCorrector::default();

        let correction = corrector.try_correct_option("numbr", &options).unwrap();
        assert_eq!(correction.target.long_name(), "count");
        assert_eq!(correction.suggestion, "count");
        assert_eq!(corrector.option_corrections()["numbr"], "count");
        assert!(corrector.verb_corrections().is_empty());
    }

    #[test]
    fn test_no_match_records_nothing() {
        let options = options();
        let verbs = vec![Verb::builder("add").build().unwrap()];
        let mut corrector = AutoCorrector::default();

        assert!(corrector.try_correct_option("zzzzzz", &options).is_none());
        assert!(corrector.try_correct_verb("qqqq", &verbs).is_none());
        assert!(!corrector.has_any_corrections());
    }

    #[test]
    fn test_first_matching_verb_wins() {
        let verbs = vec![
            Verb::builder("list").build().unwrap(),
            Verb::builder("lost").build().unwrap(),
        ];
        let mut corrector = AutoCorrector::default();

        let correction = corrector.try_correct_verb("lst", &verbs).unwrap();
        assert_eq!(correction.target.long_name(), "list");
    }
}
