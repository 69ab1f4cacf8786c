//! Conversion of raw option values to their declared type.

use argot_core::{Value, ValueKind};

use crate::error::ParseError;

/// Strips surrounding whitespace and quote characters from a raw value.
pub fn normalize(raw: &str) -> &str {
    raw.trim().trim_matches(['"', '\''])
}

/// Converts `raw` to a value of `kind` for the option named `option`.
///
/// Booleans accept `true`/`false` in any case. Integers accept decimal input
/// and truncate toward zero, so `"10.8"` becomes `10`. String values lose
/// their surrounding quotes.
///
/// # Errors
///
/// Returns [`ParseError::InvalidValue`] when the value is empty after
/// normalisation or does not parse as `kind`.
///
/// # Examples
///
/// ```
/// use argot_core::{Value, ValueKind};
/// use argot_parser::convert;
///
/// assert_eq!(convert("TrUe", ValueKind::Bool, "verbose").unwrap(), Value::Bool(true));
/// assert_eq!(convert("10.8", ValueKind::Integer, "count").unwrap(), Value::Integer(10));
/// assert_eq!(convert("'a b'", ValueKind::String, "title").unwrap(), Value::from("a b"));
/// assert!(convert("\"\"", ValueKind::String, "title").is_err());
/// ```
pub fn convert(raw: &str, kind: ValueKind, option: &str) -> Result<Value, ParseError> {
    let value = normalize(raw);
    if value.is_empty() {
        return Err(ParseError::InvalidValue {
            option: option.to_string(),
            message: format!("option '{option}' requires a value"),
        });
    }

    let invalid = || ParseError::InvalidValue {
        option: option.to_string(),
        message: format!("'{value}' is not a valid {kind} for option '{option}'"),
    };

    match kind {
        ValueKind::Bool => {
            if value.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if value.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(invalid())
            }
        }
        ValueKind::Integer => {
            if let Ok(whole) = value.parse::<i64>() {
                return Ok(Value::Integer(whole));
            }
            let number = value.parse::<f64>().map_err(|_| invalid())?;
            let truncated = number.trunc();
            if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
                return Err(invalid());
            }
            Ok(Value::Integer(truncated as i64))
        }
        ValueKind::Float => value
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid()),
        ValueKind::String => Ok(Value::String(value.to_string())),
    }
}
