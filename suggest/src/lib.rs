//! Typo correction for argot verb and option names.
//!
//! - [`SimilarityMetric`] — string similarity in `[0.0, 1.0]`, implemented by
//!   [`LevenshteinRatio`] and [`JaroWinkler`].
//! - [`soundex`] — phonetic code used to boost similar-sounding names.
//! - [`SuggestionEngine`] — ranks candidate names against a mistyped token.
//! - [`AutoCorrector`] — per-session wrapper that records accepted
//!   corrections for verbs and options.
//!
//! # Example
//!
//! ```
//! use argot_suggest::{SuggestionEngine, format_hint};
//!
//! let engine = SuggestionEngine::default();
//! let suggestions = engine.suggest("verbsoe", ["verbose", "version", "quiet"]);
//! assert_eq!(suggestions.first().map(String::as_str), Some("verbose"));
//! assert!(format_hint(&suggestions).starts_with(". Did you mean 'verbose'"));
//! ```

mod corrector;
mod engine;
mod metric;
mod soundex;

pub use corrector::{AutoCorrector, Correction};
pub use engine::{
    DEFAULT_MAX_SUGGESTIONS, DEFAULT_MIN_SCORE, DEFAULT_PHONETIC_BOOST, DEFAULT_PREFIX_BOOST,
    Suggestion, SuggestionConfig, SuggestionEngine, format_hint,
};
pub use metric::{
    JARO_WINKLER_MAX_PREFIX, JARO_WINKLER_PREFIX_SCALE, JaroWinkler, LevenshteinRatio,
    SimilarityMetric,
};
pub use soundex::{SOUNDEX_LEN, soundex};
