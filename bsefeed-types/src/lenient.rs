//! Field decoders for upstream values whose JSON type varies between endpoint variants.
//!
//! The exchange encodes the same field as a number on one endpoint and as a
//! string on another (`CRITICALNEWS: 1` vs `"1"`, `Fld_Attachsize: 1024` vs
//! `"1024"`). These helpers normalize once at the parse boundary.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Tri-state flag: `Some(true)` for `1`/`"1"`/`true`, `Some(false)` for
/// `0`/`"0"`/`false`, `None` for null, missing, or anything else.
pub fn flag<'de, D>(d: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(flag_value))
}

pub(crate) fn flag_value(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim() {
            "1" => Some(true),
            "0" => Some(false),
            t if t.eq_ignore_ascii_case("true") => Some(true),
            t if t.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Optional unsigned count from a number or a numeric string.
pub fn count<'de, D>(d: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(count_value))
}

pub(crate) fn count_value(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Text from a string or a number; null and missing become the empty string.
pub fn text<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// Nullable text: null stays `None`, numbers are rendered as text.
pub fn opt_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(match v {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flag_accepts_numeric_and_string_encodings() {
        assert_eq!(flag_value(&json!(1)), Some(true));
        assert_eq!(flag_value(&json!("1")), Some(true));
        assert_eq!(flag_value(&json!(0)), Some(false));
        assert_eq!(flag_value(&json!(" 0 ")), Some(false));
        assert_eq!(flag_value(&json!(true)), Some(true));
        assert_eq!(flag_value(&json!("")), None);
        assert_eq!(flag_value(&json!(2)), None);
        assert_eq!(flag_value(&Value::Null), None);
    }

    #[test]
    fn count_accepts_numbers_and_digit_strings() {
        assert_eq!(count_value(&json!(2048)), Some(2048));
        assert_eq!(count_value(&json!("2048")), Some(2048));
        assert_eq!(count_value(&json!("n/a")), None);
        assert_eq!(count_value(&json!(-3)), None);
    }
}
