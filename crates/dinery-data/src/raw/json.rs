//! JSON listings payloads.
//!
//! The public listings endpoint wraps the collection as `{"restaurants": [...]}`
//! while the owner endpoint returns a bare array. Both decode to the same
//! ordered `Vec<RestaurantRecord>`. A record that cannot be decoded at all
//! (no id, wrong type) is skipped with a warning instead of failing the batch.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, warn};

use super::Result;
use crate::{DataError, RestaurantRecord};

pub fn read_listings(path: impl AsRef<Path>) -> Result<Vec<RestaurantRecord>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    decode_listings(&text)
}

pub fn decode_listings(payload: &str) -> Result<Vec<RestaurantRecord>> {
    let value: Value = serde_json::from_str(payload)?;
    decode_listings_value(value)
}

pub fn decode_listings_value(value: Value) -> Result<Vec<RestaurantRecord>> {
    let rows = match value {
        Value::Array(rows) => rows,
        Value::Object(mut envelope) => match envelope.remove("restaurants") {
            Some(Value::Array(rows)) => rows,
            _ => {
                return Err(DataError::UnsupportedFormat(
                    "object payload without a `restaurants` array".to_string(),
                ));
            }
        },
        other => {
            return Err(DataError::UnsupportedFormat(format!(
                "expected an array or envelope, got {}",
                json_kind(&other)
            )));
        }
    };

    let total = rows.len();
    let listings: Vec<RestaurantRecord> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            serde_json::from_value(row)
                .inspect_err(|e| warn!(index, error = %e, "Skipping undecodable listing"))
                .ok()
        })
        .collect();
    debug!(total, decoded = listings.len(), "Decoded listings payload");
    Ok(listings)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_and_bare_array() {
        let envelope = r#"{"restaurants": [{"rid": 1, "name": "A"}, {"rid": 2, "name": "B"}]}"#;
        let bare = r#"[{"rid": 1, "name": "A"}, {"rid": 2, "name": "B"}]"#;

        let a = decode_listings(envelope).unwrap();
        let b = decode_listings(bare).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert_eq!(a[1].name, "B");
    }

    #[test]
    fn test_undecodable_rows_are_skipped() {
        let payload = r#"[{"rid": 1, "name": "Kept"}, {"name": "No id"}, "junk", {"rid": 3}]"#;
        let listings = decode_listings(payload).unwrap();
        let ids: Vec<u32> = listings.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_unsupported_shapes() {
        assert!(matches!(
            decode_listings(r#"{"data": []}"#),
            Err(DataError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            decode_listings("42"),
            Err(DataError::UnsupportedFormat(_))
        ));
        assert!(matches!(decode_listings("{"), Err(DataError::Serde(_))));
    }
}
