//! Text encodings shared by the accessor chain and the struct populator

use std::collections::HashMap;
use std::num::ParseFloatError;
use std::str::FromStr;

/// Delimiter used when a list is split without an explicit delimiter.
pub const DEFAULT_DELIMITER: &str = ",";

const TRUTHY: [&str; 4] = ["true", "1", "yes", "y"];

/// Returns `true` iff the trimmed value is one of `true`, `1`, `yes`, `y`
/// (case-insensitive). Every other input, including garbage, is `false`.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    TRUTHY.iter().any(|token| value.eq_ignore_ascii_case(token))
}

/// Split `value` on `delimiter` and trim every item.
///
/// An empty delimiter falls back to [`DEFAULT_DELIMITER`]. Empty items between
/// consecutive delimiters are kept and quotes are not stripped.
pub fn split_list(value: &str, delimiter: &str) -> Vec<String> {
    let delimiter = if delimiter.is_empty() {
        DEFAULT_DELIMITER
    } else {
        delimiter
    };

    value
        .split(delimiter)
        .map(|item| item.trim().to_string())
        .collect()
}

/// Parse `key1:value1,key2:value2` into any map type.
///
/// Each entry is split on its first colon, so values may contain colons.
/// Entries without a colon are dropped and the last duplicate key wins.
pub fn split_map<M>(value: &str) -> M
where
    M: FromIterator<(String, String)>,
{
    value
        .split(',')
        .filter_map(|entry| entry.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

/// Reasons a floating point literal is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FloatError {
    #[error(transparent)]
    Invalid(#[from] ParseFloatError),

    #[error("value out of range")]
    OutOfRange,
}

/// Parse an IEEE-754 literal, rejecting finite literals too large for `F`.
///
/// `inf`, `infinity` and `nan` (any case, optionally signed) are accepted as
/// written.
pub fn parse_float<F>(value: &str) -> Result<F, FloatError>
where
    F: FromStr<Err = ParseFloatError> + Into<f64> + Copy,
{
    let parsed = value.parse::<F>()?;
    if parsed.into().is_finite() {
        return Ok(parsed);
    }

    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    let literal = ["inf", "infinity", "nan"]
        .iter()
        .any(|token| unsigned.eq_ignore_ascii_case(token));
    if literal {
        Ok(parsed)
    } else {
        Err(FloatError::OutOfRange)
    }
}

/// [`split_map`] into a `HashMap`, the accessor chain's map type.
pub fn split_string_map(value: &str) -> HashMap<String, String> {
    split_map(value)
}
