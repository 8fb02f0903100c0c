//! Numeric coercion for Graph API insight values
//!
//! Insights arrive as JSON numbers, numeric strings (`"25.50"`), `null`, or
//! not at all. Every metric goes through [`coerce`] so the outcome is always a
//! finite number, with 0 standing in for anything that is not one.

use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// A numeric metric type that upstream values can be coerced into
pub trait Metric: Copy + Default {
    fn from_number(n: &Number) -> Option<Self>;
    fn from_text(s: &str) -> Option<Self>;
}

impl Metric for i64 {
    fn from_number(n: &Number) -> Option<Self> {
        n.as_i64().or_else(|| finite(n.as_f64()?).map(|f| f.trunc() as i64))
    }

    fn from_text(s: &str) -> Option<Self> {
        s.parse::<i64>()
            .ok()
            .or_else(|| finite(s.parse::<f64>().ok()?).map(|f| f.trunc() as i64))
    }
}

impl Metric for f64 {
    fn from_number(n: &Number) -> Option<Self> {
        finite(n.as_f64()?)
    }

    fn from_text(s: &str) -> Option<Self> {
        finite(s.parse::<f64>().ok()?)
    }
}

fn finite(f: f64) -> Option<f64> {
    f.is_finite().then_some(f)
}

/// Coerce an optional JSON value into a metric, falling back to zero
pub fn coerce<T: Metric>(value: Option<&Value>) -> T {
    let coerced = match value {
        Some(Value::Number(n)) => T::from_number(n),
        Some(Value::String(s)) => T::from_text(s.trim()),
        _ => None,
    };
    coerced.unwrap_or_default()
}

/// Serde adapter applying [`coerce`]; pair with `#[serde(default)]` so absent keys become 0
pub fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Metric,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(coerce(value.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_counts_from_strings_and_numbers() {
        assert_eq!(coerce::<i64>(Some(&json!("100"))), 100);
        assert_eq!(coerce::<i64>(Some(&json!(500))), 500);
        assert_eq!(coerce::<i64>(Some(&json!(" 42 "))), 42);
        assert_eq!(coerce::<i64>(Some(&json!("12.9"))), 12);
        assert_eq!(coerce::<i64>(Some(&json!(7.5))), 7);
    }

    #[test]
    fn test_amounts_from_strings_and_numbers() {
        assert_eq!(coerce::<f64>(Some(&json!("25.50"))), 25.5);
        assert_eq!(coerce::<f64>(Some(&json!(2.55))), 2.55);
        assert_eq!(coerce::<f64>(Some(&json!(10))), 10.0);
    }

    #[test]
    fn test_fallback_to_zero() {
        assert_eq!(coerce::<i64>(None), 0);
        assert_eq!(coerce::<i64>(Some(&Value::Null)), 0);
        assert_eq!(coerce::<i64>(Some(&json!("n/a"))), 0);
        assert_eq!(coerce::<i64>(Some(&json!(true))), 0);
        assert_eq!(coerce::<f64>(Some(&json!(""))), 0.0);
        assert_eq!(coerce::<f64>(Some(&json!({"value": 1}))), 0.0);
    }

    #[test]
    fn test_non_finite_text_is_zero() {
        assert_eq!(coerce::<f64>(Some(&json!("NaN"))), 0.0);
        assert_eq!(coerce::<f64>(Some(&json!("inf"))), 0.0);
        assert_eq!(coerce::<i64>(Some(&json!("-infinity"))), 0);
    }

    #[test]
    fn test_lenient_deserializer() {
        #[derive(Deserialize)]
        struct Row {
            #[serde(default, deserialize_with = "lenient")]
            clicks: i64,
            #[serde(default, deserialize_with = "lenient")]
            spend: f64,
            #[serde(default, deserialize_with = "lenient")]
            ctr: f64,
        }

        let row: Row = serde_json::from_value(json!({"clicks": "10", "spend": null})).unwrap();
        assert_eq!(row.clicks, 10);
        assert_eq!(row.spend, 0.0);
        assert_eq!(row.ctr, 0.0);
    }
}
