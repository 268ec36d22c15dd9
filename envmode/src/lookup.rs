//! Chainable accessor over a single resolved environment value

use std::collections::HashMap;

use chrono::TimeDelta;

use crate::duration::parse_duration;
use crate::error::{CoerceError, LookupError};
use crate::parse::{is_truthy, parse_float, split_list, split_string_map};
use crate::populate::TargetKind;

/// The value found for one key, plus any failure recorded along the chain.
///
/// Chain steps ([`required`](Self::required), [`default`](Self::default))
/// consume the result and hand back a new one. Once a failure is recorded it
/// is never cleared and later steps leave the value untouched. Terminals
/// borrow the result, so calling one twice gives the same answer.
///
/// Strict terminals (`int`, `float`, `duration`) report failures. The `*_or`
/// terminals, `bool`, `list` and `map` always produce a value.
///
/// ```rust
/// use envmode::LookupResult;
///
/// let port = LookupResult::new("PORT", "").default("8080").int_or(80);
/// assert_eq!(port, 8080);
///
/// let name = LookupResult::new("DB_NAME", "").required().default("db");
/// assert!(name.is_failed());
/// assert_eq!(name.as_str(), "");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    key: String,
    value: String,
    failure: Option<LookupError>,
}

impl LookupResult {
    /// Start a chain for `key` with its resolved value (empty when absent).
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            failure: None,
        }
    }

    /// Start a chain that already carries `failure`.
    pub fn failed(key: impl Into<String>, failure: LookupError) -> Self {
        Self {
            key: key.into(),
            value: String::new(),
            failure: Some(failure),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn failure(&self) -> Option<&LookupError> {
        self.failure.as_ref()
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    fn is_unusable(&self) -> bool {
        self.failure.is_some() || self.value.is_empty()
    }

    /// Record a failure if the value is empty.
    pub fn required(mut self) -> Self {
        if self.failure.is_none() && self.value.is_empty() {
            self.failure = Some(LookupError::Required {
                key: self.key.clone(),
            });
        }
        self
    }

    /// Substitute `fallback` if the value is empty and nothing has failed.
    pub fn default(mut self, fallback: impl Into<String>) -> Self {
        if self.failure.is_none() && self.value.is_empty() {
            self.value = fallback.into();
        }
        self
    }

    /// The raw value, regardless of any carried failure.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Run `parse` on the value, replaying a carried failure first.
    fn strict<T, E, F>(&self, kind: TargetKind, parse: F) -> Result<T, LookupError>
    where
        F: FnOnce(&str) -> Result<T, E>,
        E: std::fmt::Display,
    {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        if self.value.is_empty() {
            return Err(LookupError::NotFound {
                key: self.key.clone(),
            });
        }
        parse(&self.value).map_err(|e| LookupError::Parse {
            key: self.key.clone(),
            source: CoerceError::new(kind, self.value.as_str(), e),
        })
    }

    /// Parse the value as a base-10 `i64`.
    pub fn int(&self) -> Result<i64, LookupError> {
        self.strict(TargetKind::Signed { bits: i64::BITS }, str::parse::<i64>)
    }

    /// [`int`](Self::int), or `fallback` on any error.
    ///
    /// This falls back even when a string set by [`default`](Self::default)
    /// fails to parse.
    pub fn int_or(&self, fallback: i64) -> i64 {
        self.int().unwrap_or(fallback)
    }

    /// Parse the value as an IEEE-754 double.
    pub fn float(&self) -> Result<f64, LookupError> {
        self.strict(TargetKind::Float { bits: 64 }, parse_float::<f64>)
    }

    pub fn float_or(&self, fallback: f64) -> f64 {
        self.float().unwrap_or(fallback)
    }

    /// Parse the value as a compound duration such as `1h30m45s`.
    pub fn duration(&self) -> Result<TimeDelta, LookupError> {
        self.strict(TargetKind::Duration, parse_duration)
    }

    pub fn duration_or(&self, fallback: TimeDelta) -> TimeDelta {
        self.duration().unwrap_or(fallback)
    }

    /// `true` iff the value is a truthy token; never fails.
    pub fn bool(&self) -> bool {
        !self.is_unusable() && is_truthy(&self.value)
    }

    pub fn bool_or(&self, fallback: bool) -> bool {
        if self.is_unusable() {
            return fallback;
        }
        self.bool()
    }

    /// Split the value on `delimiter` (`","` when empty), trimming each item.
    pub fn list(&self, delimiter: &str) -> Vec<String> {
        if self.is_unusable() {
            return Vec::new();
        }
        split_list(&self.value, delimiter)
    }

    pub fn list_or(&self, delimiter: &str, fallback: Vec<String>) -> Vec<String> {
        if self.is_unusable() {
            return fallback;
        }
        self.list(delimiter)
    }

    /// Parse the value as `key1:value1,key2:value2`.
    pub fn map(&self) -> HashMap<String, String> {
        if self.is_unusable() {
            return HashMap::new();
        }
        split_string_map(&self.value)
    }

    pub fn map_or(&self, fallback: HashMap<String, String>) -> HashMap<String, String> {
        if self.is_unusable() {
            return fallback;
        }
        self.map()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carried() -> LookupResult {
        LookupResult {
            key: "TEST_KEY".to_string(),
            value: "valid_but_ignored".to_string(),
            failure: Some(LookupError::Required {
                key: "TEST_KEY".to_string(),
            }),
        }
    }

    #[test]
    fn test_required_on_empty_sets_failure() {
        let r = LookupResult::new("APP_NAME", "").required();
        assert_eq!(
            r.failure(),
            Some(&LookupError::Required {
                key: "APP_NAME".to_string()
            })
        );
        assert!(r.failure().unwrap().to_string().contains("APP_NAME"));
    }

    #[test]
    fn test_required_on_present_value() {
        let r = LookupResult::new("APP_NAME", "svc").required();
        assert!(!r.is_failed());
        assert_eq!(r.as_str(), "svc");
    }

    #[test]
    fn test_default_on_empty() {
        let r = LookupResult::new("APP_NAME", "").default("fallback");
        assert_eq!(r.as_str(), "fallback");
    }

    #[test]
    fn test_default_does_not_override() {
        let r = LookupResult::new("APP_NAME", "svc").default("fallback");
        assert_eq!(r.as_str(), "svc");
    }

    #[test]
    fn test_required_then_default_keeps_failure() {
        let r = LookupResult::new("DB_NAME", "").required().default("defaultdb");
        assert!(r.is_failed());
        assert_eq!(r.as_str(), "");
    }

    #[test]
    fn test_default_then_required_succeeds() {
        let r = LookupResult::new("DB_NAME", "").default("defaultdb").required();
        assert!(!r.is_failed());
        assert_eq!(r.as_str(), "defaultdb");
    }

    #[test]
    fn test_int() {
        let r = LookupResult::new("PORT", "8080");
        assert_eq!(r.int(), Ok(8080));
        assert_eq!(r.int_or(1), 8080);
        assert_eq!(LookupResult::new("N", "-42").int(), Ok(-42));
    }

    #[test]
    fn test_int_boundaries() {
        assert_eq!(
            LookupResult::new("N", "9223372036854775807").int(),
            Ok(i64::MAX)
        );
        assert_eq!(
            LookupResult::new("N", "-9223372036854775808").int(),
            Ok(i64::MIN)
        );
        assert!(matches!(
            LookupResult::new("N", "9223372036854775808").int(),
            Err(LookupError::Parse { .. })
        ));
    }

    #[test]
    fn test_int_empty_is_not_found() {
        let r = LookupResult::new("PORT", "");
        assert_eq!(
            r.int(),
            Err(LookupError::NotFound {
                key: "PORT".to_string()
            })
        );
        assert_eq!(r.int_or(5432), 5432);
    }

    #[test]
    fn test_int_malformed() {
        let r = LookupResult::new("PORT", "abc");
        match r.int() {
            Err(LookupError::Parse { key, source }) => {
                assert_eq!(key, "PORT");
                assert_eq!(source.value, "abc");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
        assert_eq!(r.int_or(7), 7);
        assert!(LookupResult::new("N", "12.5").int().is_err());
    }

    #[test]
    fn test_int_or_ignores_unparsable_string_default() {
        let r = LookupResult::new("PORT", "").default("not-a-number");
        assert_eq!(r.as_str(), "not-a-number");
        assert_eq!(r.int_or(3000), 3000);
    }

    #[test]
    fn test_float() {
        assert_eq!(LookupResult::new("F", "12.375").float(), Ok(12.375));
        assert_eq!(LookupResult::new("F", "1.23e+5").float(), Ok(123000.0));
        assert_eq!(LookupResult::new("F", "-1.23e-5").float(), Ok(-0.0000123));
        assert_eq!(LookupResult::new("F", "42").float(), Ok(42.0));
        assert!(LookupResult::new("F", "not_a_float").float().is_err());
        assert_eq!(LookupResult::new("F", "not_a_float").float_or(99.9), 99.9);
        assert_eq!(LookupResult::new("F", "").float_or(1.5), 1.5);
    }

    #[test]
    fn test_float_out_of_range() {
        for literal in ["1e400", "-1e400"] {
            let r = LookupResult::new("F", literal);
            match r.float() {
                Err(LookupError::Parse { key, source }) => {
                    assert_eq!(key, "F");
                    assert_eq!(source.value, literal);
                    assert_eq!(source.message, "value out of range");
                }
                other => panic!("expected parse error, got {other:?}"),
            }
            assert_eq!(r.float_or(2.0), 2.0);
        }
        assert_eq!(LookupResult::new("F", "inf").float(), Ok(f64::INFINITY));
    }

    #[test]
    fn test_duration() {
        let r = LookupResult::new("TIMEOUT", "1h30m45s");
        assert_eq!(
            r.duration(),
            Ok(TimeDelta::hours(1) + TimeDelta::minutes(30) + TimeDelta::seconds(45))
        );
        assert_eq!(
            LookupResult::new("T", "-10m").duration(),
            Ok(TimeDelta::minutes(-10))
        );
        assert!(LookupResult::new("T", "1H30M").duration().is_err());
        assert_eq!(
            LookupResult::new("T", "invalid").duration_or(TimeDelta::minutes(5)),
            TimeDelta::minutes(5)
        );
        assert_eq!(
            LookupResult::new("T", "").duration_or(TimeDelta::seconds(30)),
            TimeDelta::seconds(30)
        );
    }

    #[test]
    fn test_bool_truth_table() {
        let cases = [
            ("true", true),
            ("TRUE", true),
            ("True", true),
            ("1", true),
            ("yes", true),
            ("Y", true),
            ("false", false),
            ("0", false),
            ("no", false),
            ("N", false),
            ("maybe", false),
            ("   ", false),
            ("truthy", false),
        ];
        for (value, expected) in cases {
            let r = LookupResult::new("DEBUG", value);
            assert_eq!(r.bool(), expected, "bool() for {value:?}");
            assert_eq!(r.bool_or(!expected), expected, "bool_or() for {value:?}");
        }
    }

    #[test]
    fn test_bool_empty() {
        let r = LookupResult::new("DEBUG", "");
        assert!(!r.bool());
        assert!(r.bool_or(true));
    }

    #[test]
    fn test_list() {
        let r = LookupResult::new("HOSTS", " a , b , c ");
        assert_eq!(r.list(","), vec!["a", "b", "c"]);
        assert_eq!(LookupResult::new("H", "a,,c").list(","), vec!["a", "", "c"]);
        assert_eq!(LookupResult::new("H", "a|b").list("|"), vec!["a", "b"]);
        assert_eq!(LookupResult::new("H", "a,b").list(""), vec!["a", "b"]);
        assert!(LookupResult::new("H", "").list(",").is_empty());
    }

    #[test]
    fn test_list_or() {
        let fallback = vec!["x".to_string()];
        assert_eq!(LookupResult::new("H", "").list_or(",", fallback.clone()), fallback);
        assert_eq!(
            LookupResult::new("H", "a").list_or(",", fallback),
            vec!["a"]
        );
    }

    #[test]
    fn test_map() {
        let r = LookupResult::new("LABELS", "key1:value1,key2:value2");
        let map = r.map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["key1"], "value1");
        assert_eq!(map["key2"], "value2");

        assert_eq!(LookupResult::new("L", "k1,k2:v2").map().len(), 1);
        assert_eq!(LookupResult::new("L", "k1:v1,k1:v2").map()["k1"], "v2");
        assert!(LookupResult::new("L", "").map().is_empty());
    }

    #[test]
    fn test_map_or() {
        let fallback = HashMap::from([("default".to_string(), "value".to_string())]);
        assert_eq!(LookupResult::new("L", "").map_or(fallback.clone()), fallback);
        assert_eq!(LookupResult::new("L", "a:b").map_or(fallback)["a"], "b");
    }

    #[test]
    fn test_carried_failure_propagation() {
        let r = carried();

        assert_eq!(r.clone().required().failure(), r.failure());
        let defaulted = r.clone().default("default_value");
        assert_eq!(defaulted.failure(), r.failure());
        assert_eq!(defaulted.as_str(), "valid_but_ignored");

        assert_eq!(r.as_str(), "valid_but_ignored");
        assert_eq!(r.int(), Err(r.failure().unwrap().clone()));
        assert_eq!(r.int_or(42), 42);
        assert_eq!(r.float(), Err(r.failure().unwrap().clone()));
        assert_eq!(r.float_or(6.5), 6.5);
        assert_eq!(r.duration(), Err(r.failure().unwrap().clone()));
        assert_eq!(r.duration_or(TimeDelta::minutes(1)), TimeDelta::minutes(1));
        assert!(!r.bool());
        assert!(r.bool_or(true));
        assert!(r.list(",").is_empty());
        assert_eq!(r.list_or(",", vec!["default".to_string()]), vec!["default"]);
        assert!(r.map().is_empty());
        assert_eq!(
            r.map_or(HashMap::from([("k".to_string(), "v".to_string())]))["k"],
            "v"
        );
    }

    #[test]
    fn test_failed_constructor() {
        let failure = LookupError::NotFound {
            key: "X".to_string(),
        };
        let r = LookupResult::failed("X", failure.clone()).default("ignored");
        assert_eq!(r.as_str(), "");
        assert_eq!(r.int(), Err(failure));
    }

    #[test]
    fn test_strict_terminals_are_idempotent() {
        let r = LookupResult::new("N", "12");
        assert_eq!(r.int(), r.int());
        assert_eq!(r.float(), r.float());
        assert_eq!(r.as_str(), r.as_str());

        let bad = LookupResult::new("D", "nope");
        assert_eq!(bad.duration(), bad.duration());
    }
}
