//! FieldCoercer: per-column type normalization.
//!
//! Every coercion is total. A cell that cannot be interpreted degrades to a
//! well-defined fallback (null or `false`) instead of failing the run.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use tracing::trace;

/// Textual layouts accepted for release dates, tried in order
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%b %d, %Y",
    "%d %b, %Y",
    "%B %d, %Y",
    "%d %B, %Y",
    "%b %d %Y",
    "%d %b %Y",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d.%m.%Y",
];

/// Parse a release date permissively. Integers are epoch milliseconds.
pub fn coerce_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_date_text(s.trim()),
        Value::Number(n) => n
            .as_i64()
            .and_then(DateTime::from_timestamp_millis)
            .map(|dt| dt.date_naive()),
        _ => None,
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    if text.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    // "2023-01-01 00:00:00" and friends
    if let Some((day, _)) = text.split_once([' ', 'T']) {
        if let Ok(date) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            return Some(date);
        }
    }
    // month precision only: "Oct 2008", "October 2008"
    let first_of_month = format!("1 {}", text);
    for format in ["%d %b %Y", "%d %B %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(&first_of_month, format) {
            return Some(date);
        }
    }
    trace!(text, "unparseable release date");
    None
}

/// Date cell as stored after coercion: ISO text or null
pub fn date_cell(value: &Value) -> Value {
    match coerce_date(value) {
        Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
        None => Value::Null,
    }
}

/// "true"/"false" in any case; everything else (absence included) is false
pub fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

/// Lower bound of an owner range such as `"1,000,000 - 2,000,000"`.
///
/// The upper bound is discarded. Values already coerced to an integer pass
/// through unchanged.
pub fn coerce_owners(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => parse_lower_bound(s),
        _ => None,
    }
}

fn parse_lower_bound(range: &str) -> Option<i64> {
    let first = range.trim().split(' ').next().unwrap_or("");
    let low = first.split('-').next().unwrap_or("");
    let digits = low.replace(',', "");
    match digits.parse::<i64>() {
        Ok(n) => Some(n),
        Err(_) => {
            trace!(range, "unparseable owner range");
            None
        }
    }
}

/// `[]`, `[""]` and `""` mean "unknown"
pub fn is_empty_credit(value: &Value) -> bool {
    match value {
        Value::String(s) => s.is_empty(),
        Value::Array(items) => match items.as_slice() {
            [] => true,
            [Value::String(only)] => only.is_empty(),
            _ => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_owner_ranges() {
        assert_eq!(coerce_owners(&json!("20000-50000")), Some(20000));
        assert_eq!(coerce_owners(&json!("0-20000")), Some(0));
        assert_eq!(coerce_owners(&json!("0 - 20000")), Some(0));
        assert_eq!(coerce_owners(&json!("1,000,000-2,000,000")), Some(1_000_000));
        assert_eq!(coerce_owners(&json!("1,000,000 - 2,000,000")), Some(1_000_000));
        assert_eq!(coerce_owners(&json!("not-a-range")), None);
        assert_eq!(coerce_owners(&json!("")), None);
        assert_eq!(coerce_owners(&Value::Null), None);
        assert_eq!(coerce_owners(&json!(["0-20000"])), None);
    }

    #[test]
    fn test_owners_already_numeric() {
        assert_eq!(coerce_owners(&json!(20000)), Some(20000));
        assert_eq!(coerce_owners(&json!(20000.0)), Some(20000));
        assert_eq!(coerce_owners(&json!(1.5)), None);
        assert_eq!(coerce_owners(&json!("20000")), Some(20000));
    }

    #[test]
    fn test_bool_flags() {
        assert!(coerce_bool(Some(&json!("true"))));
        assert!(coerce_bool(Some(&json!("True"))));
        assert!(!coerce_bool(Some(&json!("FALSE"))));
        assert!(!coerce_bool(Some(&Value::Null)));
        assert!(!coerce_bool(None));
        assert!(!coerce_bool(Some(&json!("nan"))));
        assert!(!coerce_bool(Some(&json!("yes"))));
        assert!(!coerce_bool(Some(&json!(1))));
        assert!(coerce_bool(Some(&json!(true))));
    }

    #[test]
    fn test_dates() {
        let jan_first = NaiveDate::from_ymd_opt(2023, 1, 1);
        assert_eq!(coerce_date(&json!("2023-01-01")), jan_first);
        assert_eq!(coerce_date(&json!("Jan 1, 2023")), jan_first);
        assert_eq!(coerce_date(&json!("1 Jan, 2023")), jan_first);
        assert_eq!(coerce_date(&json!("January 1, 2023")), jan_first);
        assert_eq!(coerce_date(&json!("2023-01-01T10:00:00Z")), jan_first);
        assert_eq!(coerce_date(&json!("2023-01-01 00:00:00")), jan_first);
        assert_eq!(
            coerce_date(&json!("Oct 2008")),
            NaiveDate::from_ymd_opt(2008, 10, 1)
        );
        assert_eq!(coerce_date(&json!(1672531200000i64)), jan_first);
        assert_eq!(coerce_date(&json!("Coming soon")), None);
        assert_eq!(coerce_date(&json!("")), None);
        assert_eq!(coerce_date(&Value::Null), None);
    }

    #[test]
    fn test_date_cell_is_iso_or_null() {
        assert_eq!(date_cell(&json!("Jan 1, 2023")), json!("2023-01-01"));
        assert_eq!(date_cell(&json!("2023-01-01")), json!("2023-01-01"));
        assert_eq!(date_cell(&json!("TBA")), Value::Null);
    }

    #[test]
    fn test_empty_credits() {
        assert!(is_empty_credit(&json!([])));
        assert!(is_empty_credit(&json!([""])));
        assert!(is_empty_credit(&json!("")));
        assert!(!is_empty_credit(&json!(["Valve"])));
        assert!(!is_empty_credit(&json!(["", "Valve"])));
        assert!(!is_empty_credit(&json!("Valve")));
        assert!(!is_empty_credit(&Value::Null));
    }
}
