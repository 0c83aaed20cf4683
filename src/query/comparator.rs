//! Scalar comparison used by every sort
//!
//! Ordering rules, on the ascending axis:
//! - missing (absent key or JSON null) is the minimum; two missing are equal
//! - otherwise both values are rendered to text; if both texts parse as
//!   decimals they compare numerically, else lexically (case-sensitive)
//! - objects and arrays are not scalar and count as missing
//!
//! Descending order is the ascending result reversed as a whole, so missing
//! values end up last under `Desc`.

use std::cmp::Ordering;
use std::str::FromStr;
use std::sync::OnceLock;

use bigdecimal::BigDecimal;
use regex::Regex;
use serde_json::Value;

use super::params::SortDirection;

/// Textual form of a JSON value.
///
/// Strings render without quotes. Everything else renders as compact JSON.
pub fn render_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Optional sign, digits with an optional fraction, optional exponent.
const DECIMAL_PATTERN: &str = r"^[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?$";

/// True if `text` is a plain decimal literal.
///
/// `BigDecimal::from_str` alone also accepts digit separators (`1_000`),
/// which must compare as text.
fn is_plain_decimal(text: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(DECIMAL_PATTERN).ok())
        .as_ref()
        .map_or(false, |re| re.is_match(text))
}

/// True for objects and arrays.
pub fn is_non_scalar(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Pre-rendered comparison key of one scalar value.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    text: String,
    number: Option<BigDecimal>,
}

impl SortKey {
    /// Builds the key for a field value. `None` means missing.
    pub fn from_value(value: Option<&Value>) -> Option<Self> {
        match value {
            None | Some(Value::Null) => None,
            Some(v) if is_non_scalar(v) => None,
            Some(v) => Some(Self::from_text(render_text(v))),
        }
    }

    fn from_text(text: String) -> Self {
        let number = if is_plain_decimal(&text) {
            BigDecimal::from_str(&text).ok()
        } else {
            None
        };
        Self { text, number }
    }
}

/// Compares two sort keys in `direction`.
///
/// This is the single ordering primitive; every sort path goes through it.
pub fn compare_keys(
    a: Option<&SortKey>,
    b: Option<&SortKey>,
    direction: SortDirection,
) -> Ordering {
    let ascending = match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (&a.number, &b.number) {
            (Some(x), Some(y)) => x.cmp(y),
            _ => a.text.cmp(&b.text),
        },
    };

    match direction {
        SortDirection::Asc => ascending,
        SortDirection::Desc => ascending.reverse(),
    }
}

/// Compares two field values in `direction`.
pub fn compare(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    let a = SortKey::from_value(a);
    let b = SortKey::from_value(b);
    compare_keys(a.as_ref(), b.as_ref(), direction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use SortDirection::{Asc, Desc};

    fn cmp(a: Value, b: Value, dir: SortDirection) -> Ordering {
        compare(Some(&a), Some(&b), dir)
    }

    #[test]
    fn test_numeric_strings_compare_by_value() {
        assert_eq!(cmp(json!("9"), json!("10"), Asc), Ordering::Less);
        assert_eq!(cmp(json!(9), json!(10), Asc), Ordering::Less);
        assert_eq!(cmp(json!("9"), json!(10), Asc), Ordering::Less);
    }

    #[test]
    fn test_decimal_precision_is_exact() {
        assert_eq!(cmp(json!("0.1"), json!("0.10"), Asc), Ordering::Equal);
        assert_eq!(
            cmp(json!("12345678901234567890.1"), json!("12345678901234567890.2"), Asc),
            Ordering::Less
        );
        assert_eq!(cmp(json!(-3.5), json!(2), Asc), Ordering::Less);
    }

    #[test]
    fn test_mixed_pair_falls_back_to_text() {
        assert_eq!(cmp(json!("10"), json!("abc"), Asc), Ordering::Less);
        assert_eq!(cmp(json!("10"), json!("9a"), Asc), Ordering::Less);
    }

    #[test]
    fn test_digit_separators_are_not_numeric() {
        assert_eq!(cmp(json!("1_000"), json!("999"), Asc), Ordering::Less);
        assert_eq!(cmp(json!("1_0"), json!("9"), Asc), Ordering::Less);
        assert_eq!(cmp(json!("1000"), json!("999"), Asc), Ordering::Greater);
    }

    #[test]
    fn test_plain_decimal_forms() {
        for numeric in ["5", "-5", "+5", ".5", "5.", "2.50", "1e3", "1.5E-7"] {
            assert!(is_plain_decimal(numeric), "{}", numeric);
        }
        for text in ["1_000", " 5", "5 ", "0x10", "NaN", "inf", "", ".", "1e", "--1"] {
            assert!(!is_plain_decimal(text), "{}", text);
        }
    }

    #[test]
    fn test_text_comparison_is_case_sensitive() {
        assert_eq!(cmp(json!("Zed"), json!("alice"), Asc), Ordering::Less);
        assert_eq!(cmp(json!("alice"), json!("alice"), Asc), Ordering::Equal);
    }

    #[test]
    fn test_booleans_render_as_text() {
        assert_eq!(cmp(json!(false), json!(true), Asc), Ordering::Less);
        assert_eq!(cmp(json!(true), json!("true"), Asc), Ordering::Equal);
    }

    #[test]
    fn test_missing_is_minimum_ascending() {
        assert_eq!(compare(None, Some(&json!(1)), Asc), Ordering::Less);
        assert_eq!(compare(Some(&json!(1)), None, Asc), Ordering::Greater);
        assert_eq!(compare(Some(&Value::Null), Some(&json!("")), Asc), Ordering::Less);
        assert_eq!(compare(None, Some(&Value::Null), Asc), Ordering::Equal);
    }

    #[test]
    fn test_missing_goes_last_descending() {
        assert_eq!(compare(None, Some(&json!(1)), Desc), Ordering::Greater);
        assert_eq!(compare(Some(&json!("x")), None, Desc), Ordering::Less);
        assert_eq!(compare(None, None, Desc), Ordering::Equal);
    }

    #[test]
    fn test_non_scalar_counts_as_missing() {
        assert_eq!(
            compare(Some(&json!({"a": 1})), Some(&json!(0)), Asc),
            Ordering::Less
        );
        assert_eq!(compare(Some(&json!([1, 2])), None, Asc), Ordering::Equal);
    }

    #[test]
    fn test_antisymmetric_and_reflexive() {
        let values = vec![
            json!(1),
            json!("10"),
            json!("abc"),
            json!(2.5),
            json!(true),
            Value::Null,
            json!({"k": "v"}),
        ];

        for dir in [Asc, Desc] {
            for a in &values {
                assert_eq!(compare(Some(a), Some(a), dir), Ordering::Equal);
                for b in &values {
                    assert_eq!(
                        compare(Some(a), Some(b), dir),
                        compare(Some(b), Some(a), dir).reverse(),
                        "a={} b={} dir={}",
                        a,
                        b,
                        dir
                    );
                }
            }
        }
    }

    #[test]
    fn test_render_text() {
        assert_eq!(render_text(&json!("LA")), "LA");
        assert_eq!(render_text(&json!(25)), "25");
        assert_eq!(render_text(&json!(false)), "false");
        assert_eq!(render_text(&json!({"a": 1})), r#"{"a":1}"#);
    }
}
