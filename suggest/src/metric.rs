//! String similarity metrics.
//!
//! Every metric maps a pair of strings to a score in `[0.0, 1.0]`, where
//! `1.0` means identical. Two empty strings score `0.0`: an empty token is
//! never a useful suggestion, and the suggestion threshold relies on it.

/// Prefix scale applied per matching leading character in Jaro-Winkler.
pub const JARO_WINKLER_PREFIX_SCALE: f64 = 0.1;

/// Longest common prefix that earns a Jaro-Winkler bonus.
pub const JARO_WINKLER_MAX_PREFIX: usize = 4;

/// A string similarity function.
pub trait SimilarityMetric: Send + Sync {
    /// Similarity of `source` and `target` in `[0.0, 1.0]`.
    fn calculate(&self, source: &str, target: &str) -> f64;

    /// Name of the metric, used in debug logs.
    fn name(&self) -> &'static str;
}

/// Orders a pair so that scores never depend on argument order.
fn ordered<'a>(source: &'a str, target: &'a str) -> (&'a str, &'a str) {
    if source <= target {
        (source, target)
    } else {
        (target, source)
    }
}

/// `1 - distance / max_len` over the classic unit-cost edit distance.
///
/// # Examples
///
/// ```
/// use argot_suggest::{LevenshteinRatio, SimilarityMetric};
///
/// let metric = LevenshteinRatio;
/// assert_eq!(metric.calculate("add", "add"), 1.0);
/// assert_eq!(metric.calculate("", ""), 0.0);
/// assert!((metric.calculate("kitten", "sitting") - (1.0 - 3.0 / 7.0)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinRatio;

impl SimilarityMetric for LevenshteinRatio {
    fn calculate(&self, source: &str, target: &str) -> f64 {
        let (source, target) = ordered(source, target);
        let max_len = source.chars().count().max(target.chars().count());
        if max_len == 0 {
            return 0.0;
        }
        let distance = strsim::levenshtein(source, target);
        1.0 - distance as f64 / max_len as f64
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Jaro similarity boosted by the length of the common prefix.
///
/// # Examples
///
/// ```
/// use argot_suggest::{JaroWinkler, SimilarityMetric};
///
/// let metric = JaroWinkler;
/// assert_eq!(metric.calculate("", ""), 0.0);
/// assert_eq!(metric.calculate("verbose", "verbose"), 1.0);
/// assert!(metric.calculate("verbose", "verbsoe") > metric.calculate("verbose", "esobrev"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl SimilarityMetric for JaroWinkler {
    fn calculate(&self, source: &str, target: &str) -> f64 {
        if source.is_empty() && target.is_empty() {
            return 0.0;
        }
        let (source, target) = ordered(source, target);
        let jaro = strsim::jaro(source, target);
        let prefix = source
            .chars()
            .zip(target.chars())
            .take(JARO_WINKLER_MAX_PREFIX)
            .take_while(|(a, b)| a == b)
            .count();
        let score = jaro + prefix as f64 * JARO_WINKLER_PREFIX_SCALE * (1.0 - jaro);
        score.clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "jaro-winkler"
    }
}
