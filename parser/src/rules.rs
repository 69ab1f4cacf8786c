//! Cross-option relationship and value constraint checks.
//!
//! Mutual rules name their related options as strings; names are resolved
//! against the sibling options here, at validation time. Unknown names are
//! skipped. An option counts as present when any of its names was given.

use argot_core::{MutualKind, OptionSpec, ValueKind};
use tracing::debug;

use crate::convert::normalize;
use crate::error::ParseError;
use crate::tokenizer::ParsedValues;

/// Runs the mutual-relationship check, then the settings check, for
/// `current`.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate(
    options: &[OptionSpec],
    current: &OptionSpec,
    values: &ParsedValues,
) -> Result<(), ParseError> {
    check_mutual(options, current, values)?;
    check_settings(current, values)
}

/// Returns `true` if any name of `option` was given.
pub fn is_present(option: &OptionSpec, values: &ParsedValues) -> bool {
    option.names().any(|name| values.contains(name))
}

/// Checks every [`MutualRule`](argot_core::MutualRule) of `current`.
///
/// Inclusive rules fail when exactly one of the pair is present; exclusive
/// rules fail when both are.
///
/// # Examples
///
/// ```
/// use argot_core::{MutualRule, OptionSpec, ValueKind};
/// use argot_parser::{ParsedValues, rules};
///
/// let options = vec![
///     OptionSpec::builder("read", ValueKind::String)
///         .mutual(MutualRule::exclusive(["write"]))
///         .build()
///         .unwrap(),
///     OptionSpec::builder("write", ValueKind::String).build().unwrap(),
/// ];
///
/// let mut values = ParsedValues::default();
/// values.insert("read", "a");
/// assert!(rules::check_mutual(&options, &options[0], &values).is_ok());
///
/// values.insert("write", "b");
/// assert!(rules::check_mutual(&options, &options[0], &values).is_err());
/// ```
pub fn check_mutual(
    options: &[OptionSpec],
    current: &OptionSpec,
    values: &ParsedValues,
) -> Result<(), ParseError> {
    let current_present = is_present(current, values);

    for rule in current.mutual_rules() {
        for related_name in rule.related() {
            let Some(related) = options.iter().find(|option| option.matches(related_name)) else {
                debug!(
                    option = current.long_name(),
                    related = %related_name,
                    "Skipping mutual rule with unknown related option"
                );
                continue;
            };
            let related_present = is_present(related, values);

            let violated = match rule.kind() {
                MutualKind::Inclusive => current_present != related_present,
                MutualKind::Exclusive => current_present && related_present,
            };
            if violated {
                return Err(ParseError::MutualViolation {
                    option: current.long_name().to_string(),
                    related: related.long_name().to_string(),
                    kind: rule.kind(),
                });
            }
        }
    }

    Ok(())
}

/// Checks the [`SettingsRule`](argot_core::SettingsRule) of `current`
/// against its given value.
///
/// Skipped when the option has no settings, was not given, or was given
/// without a value (conversion reports that case). For integer options the
/// range applies only when both bounds are set; the value must then parse as
/// an integer. The pattern is compiled on first use. Allowed values compare
/// case-insensitively.
///
/// # Errors
///
/// Returns [`ParseError::SettingsViolation`] for a broken constraint and
/// [`ParseError::IllegalOperation`] for a pattern that does not compile.
pub fn check_settings(current: &OptionSpec, values: &ParsedValues) -> Result<(), ParseError> {
    let Some(settings) = current.settings() else {
        return Ok(());
    };
    let Some((_, raw)) = values.find_any(current.names()) else {
        return Ok(());
    };
    let value = normalize(raw);
    if value.is_empty() {
        return Ok(());
    }

    let name = current.long_name();
    let violation = |message: String| ParseError::SettingsViolation {
        option: name.to_string(),
        message,
    };

    if current.kind() == ValueKind::Integer {
        if let Some((min, max)) = settings.bounds() {
            let number: i64 = value.parse().map_err(|_| {
                violation(format!(
                    "value '{value}' of option '{name}' is not an integer"
                ))
            })?;
            if number < min {
                return Err(violation(format!(
                    "value {number} of option '{name}' is below the minimum of {min}"
                )));
            }
            if number > max {
                return Err(violation(format!(
                    "value {number} of option '{name}' is above the maximum of {max}"
                )));
            }
        }
    }

    let regex = settings.pattern_regex().map_err(|err| {
        ParseError::IllegalOperation(format!("invalid pattern for option '{name}': {err}"))
    })?;
    if let Some(regex) = regex {
        if !regex.is_match(value) {
            let message = match settings.pattern_message() {
                Some(custom) => custom.to_string(),
                None => format!(
                    "value '{value}' of option '{name}' does not match pattern '{}'",
                    regex.as_str()
                ),
            };
            return Err(violation(message));
        }
    }

    let allowed = settings.allowed_values();
    if !allowed.is_empty() && !allowed.iter().any(|a| a.eq_ignore_ascii_case(value)) {
        return Err(violation(format!(
            "value '{value}' of option '{name}' must be one of: {}",
            allowed.join(", ")
        )));
    }

    Ok(())
}
