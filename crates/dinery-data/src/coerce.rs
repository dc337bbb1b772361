//! Tolerant field coercions shared by listing and menu decoding.
//!
//! The listings service transports numbers as JSON numbers or as text depending
//! on the column type, so every numeric field goes through these helpers. A value
//! that cannot be read as a number becomes the zero value instead of an error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::trace;

/// Read a decimal from a number or numeric text. Anything else is `None`.
pub(crate) fn decimal(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

pub(crate) fn rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal(&value).unwrap_or_else(|| {
        trace!(?value, "Rating is not numeric, coercing to 0");
        0.0
    }))
}

pub(crate) fn price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(decimal(&value).filter(|p| *p >= 0.0).unwrap_or(0.0))
}

pub(crate) fn status<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let status = match &value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    };
    Ok(status.unwrap_or(0))
}

pub(crate) fn zip<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n.as_u64().and_then(|z| u32::try_from(z).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    })
}

pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    })
}

/// Menus are stored as JSON text, but some endpoints inline the decoded value.
/// Inline values are re-serialised so decoding happens in exactly one place.
pub(crate) fn menu_payload<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decimal_accepts_numbers_and_numeric_text() {
        assert_eq!(decimal(&json!(4.5)), Some(4.5));
        assert_eq!(decimal(&json!("3.25")), Some(3.25));
        assert_eq!(decimal(&json!(" 2 ")), Some(2.0));
        assert_eq!(decimal(&json!("four")), None);
        assert_eq!(decimal(&json!(null)), None);
        assert_eq!(decimal(&json!("NaN")), None);
    }
}
