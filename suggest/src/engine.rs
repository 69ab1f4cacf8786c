//! Ranking of candidate names against a mistyped token.
//!
//! The base score of a candidate is the mean of all configured
//! [`SimilarityMetric`]s, computed case-insensitively. A candidate that is a
//! prefix of the input (or vice versa) and a candidate with the same Soundex
//! code receive additive boosts. Candidates below the minimum score are
//! dropped; the rest are ordered by score, ties keeping candidate order.

use argot_core::{OptionSpec, Verb};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metric::{JaroWinkler, LevenshteinRatio, SimilarityMetric};
use crate::soundex::soundex;

/// Minimum boosted score (0.6) for a candidate to be suggested.
pub const DEFAULT_MIN_SCORE: f64 = 0.6;

/// Boost (0.15) when one name is a prefix of the other.
pub const DEFAULT_PREFIX_BOOST: f64 = 0.15;

/// Boost (0.2) when both names share a Soundex code.
pub const DEFAULT_PHONETIC_BOOST: f64 = 0.2;

/// Maximum number of suggestions returned (3).
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// Tuning knobs for [`SuggestionEngine`].
///
/// # Examples
///
/// ```
/// use argot_suggest::SuggestionConfig;
///
/// let config = SuggestionConfig::default();
/// assert_eq!(config.min_score, 0.6);
/// assert_eq!(config.max_suggestions, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    pub min_score: f64,
    pub prefix_boost: f64,
    pub phonetic_boost: f64,
    pub max_suggestions: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            prefix_boost: DEFAULT_PREFIX_BOOST,
            phonetic_boost: DEFAULT_PHONETIC_BOOST,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }
}

/// A ranked candidate and its boosted score.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub candidate: String,
    pub score: f64,
}

/// Ranks candidate names against a mistyped token.
///
/// # Examples
///
/// ```
/// use argot_suggest::SuggestionEngine;
///
/// let engine = SuggestionEngine::default();
/// assert_eq!(engine.suggest("commnad", ["command", "config"]), vec!["command"]);
/// assert!(engine.suggest("xyz", ["command"]).is_empty());
/// assert!(engine.suggest("   ", ["command"]).is_empty());
/// ```
pub struct SuggestionEngine {
    metrics: Vec<Box<dyn SimilarityMetric>>,
    config: SuggestionConfig,
}

impl std::fmt::Debug for SuggestionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionEngine")
            .field(
                "metrics",
                &self.metrics.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .field("config", &self.config)
            .finish()
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(SuggestionConfig::default())
    }
}

impl SuggestionEngine {
    /// Creates an engine using Levenshtein-ratio and Jaro-Winkler.
    pub fn new(config: SuggestionConfig) -> Self {
        Self::with_metrics(
            config,
            vec![Box::new(LevenshteinRatio), Box::new(JaroWinkler)],
        )
    }

    pub fn with_metrics(config: SuggestionConfig, metrics: Vec<Box<dyn SimilarityMetric>>) -> Self {
        Self { metrics, config }
    }

    pub fn config(&self) -> &SuggestionConfig {
        &self.config
    }

    /// Boosted, case-insensitive score of `candidate` against `input`.
    pub fn score(&self, input: &str, candidate: &str) -> f64 {
        let input = input.trim().to_lowercase();
        let input_code = soundex(&input);
        self.score_lowered(&input, &input_code, &candidate.to_lowercase())
    }

    fn score_lowered(&self, input: &str, input_code: &str, candidate: &str) -> f64 {
        let base = if self.metrics.is_empty() {
            0.0
        } else {
            let total: f64 = self
                .metrics
                .iter()
                .map(|metric| metric.calculate(input, candidate))
                .sum();
            total / self.metrics.len() as f64
        };

        let mut score = base;
        if !candidate.is_empty() && (candidate.starts_with(input) || input.starts_with(candidate)) {
            score += self.config.prefix_boost;
        }
        if !input_code.is_empty() && soundex(candidate) == input_code {
            score += self.config.phonetic_boost;
        }
        score
    }

    /// Ranks `candidates` against `input`, best first.
    ///
    /// Candidates are deduplicated case-insensitively (first spelling wins)
    /// before scoring. Blank input returns nothing without scoring.
    pub fn rank<'a, I>(&self, input: &str, candidates: I) -> Vec<Suggestion>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let input = input.trim();
        if input.is_empty() {
            return Vec::new();
        }
        let needle = input.to_lowercase();
        let needle_code = soundex(&needle);

        let mut seen: Vec<String> = Vec::new();
        let mut ranked: Vec<Suggestion> = Vec::new();
        for candidate in candidates {
            let lowered = candidate.to_lowercase();
            if lowered.trim().is_empty() || seen.contains(&lowered) {
                continue;
            }
            let score = self.score_lowered(&needle, &needle_code, &lowered);
            seen.push(lowered);
            if score >= self.config.min_score {
                ranked.push(Suggestion {
                    candidate: candidate.to_string(),
                    score,
                });
            }
        }

        // Stable sort keeps candidate order on ties.
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(self.config.max_suggestions);
        debug!(
            input,
            suggestions = ?ranked.iter().map(|s| (s.candidate.as_str(), s.score)).collect::<Vec<_>>(),
            "Ranked suggestions"
        );
        ranked
    }

    /// Like [`rank`](Self::rank), returning only the candidate names.
    pub fn suggest<'a, I>(&self, input: &str, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.rank(input, candidates)
            .into_iter()
            .map(|s| s.candidate)
            .collect()
    }

    /// Suggestions for a verb, drawn from its long and short names.
    pub fn suggest_verb(&self, input: &str, verb: &Verb) -> Vec<String> {
        let candidates = std::iter::once(verb.long_name()).chain(verb.short_name());
        self.suggest(input, candidates)
    }

    /// Suggestions across several verbs, drawn from their long and short names.
    pub fn suggest_verbs(&self, input: &str, verbs: &[Verb]) -> Vec<String> {
        let candidates = verbs
            .iter()
            .flat_map(|verb| std::iter::once(verb.long_name()).chain(verb.short_name()));
        self.suggest(input, candidates)
    }

    /// Suggestions for options, grouped by the option that owns each match.
    ///
    /// All names of all options are ranked together. A hit on any name of an
    /// option yields that option's whole name group (long, short, aliases),
    /// in ranking order of the options' best hits.
    ///
    /// # Examples
    ///
    /// ```
    /// use argot_core::{OptionSpec, ValueKind};
    /// use argot_suggest::SuggestionEngine;
    ///
    /// let options = vec![
    ///     OptionSpec::builder("read", ValueKind::String)
    ///         .short('r')
    ///         .alias("input")
    ///         .build()
    ///         .unwrap(),
    ///     OptionSpec::builder("count", ValueKind::Integer).build().unwrap(),
    /// ];
    ///
    /// let engine = SuggestionEngine::default();
    /// assert_eq!(engine.suggest_options("inptu", &options), vec!["read", "r", "input"]);
    /// ```
    pub fn suggest_options(&self, input: &str, options: &[OptionSpec]) -> Vec<String> {
        let pooled: Vec<(&str, usize)> = options
            .iter()
            .enumerate()
            .flat_map(|(index, option)| option.names().map(move |name| (name, index)))
            .collect();

        let mut owners: Vec<usize> = Vec::new();
        for suggestion in self.rank(input, pooled.iter().map(|(name, _)| *name)) {
            let owner = pooled
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(&suggestion.candidate))
                .map(|(_, index)| *index);
            if let Some(owner) = owner {
                if !owners.contains(&owner) {
                    owners.push(owner);
                }
            }
        }

        owners
            .into_iter()
            .flat_map(|index| options[index].names().map(String::from))
            .collect()
    }
}

/// Renders a "did you mean" fragment, or an empty string with no suggestions.
///
/// # Examples
///
/// ```
/// use argot_suggest::format_hint;
///
/// assert_eq!(format_hint(&["add".to_string()]), ". Did you mean 'add'?");
/// assert_eq!(
///     format_hint(&["add".to_string(), "a".to_string()]),
///     ". Did you mean 'add' or 'a'?"
/// );
/// assert_eq!(format_hint(&[]), "");
/// ```
pub fn format_hint(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::new(),
        [only] => format!(". Did you mean '{only}'?"),
        [rest @ .., last] => {
            let quoted = rest
                .iter()
                .map(|s| format!("'{s}'"))
                .collect::<Vec<_>>()
                .join(", ");
            format!(". Did you mean {quoted} or '{last}'?")
        }
    }
}
