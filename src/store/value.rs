//! Conversion between plain JSON and the store's typed value encoding.
//!
//! The document store wraps every field in a typed envelope
//! (`stringValue`, `integerValue`, `timestampValue`, ...). Records in this
//! crate are plain serde structs, so reads and writes go through the two
//! conversions here. Integers travel as decimal strings on the wire;
//! RFC 3339 strings are stored as native timestamps so range queries and
//! ordering on them behave chronologically.

use chrono::DateTime;
use serde_json::{Map, Value, json};

use super::error::{StoreError, StoreResult};

/// Encode a plain JSON value into the store's typed envelope.
#[must_use]
pub fn to_store_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if n.is_f64() {
                json!({ "doubleValue": n })
            } else {
                // Integers are decimal strings on the wire.
                json!({ "integerValue": n.to_string() })
            }
        }
        Value::String(s) => {
            if DateTime::parse_from_rfc3339(s).is_ok() {
                json!({ "timestampValue": s })
            } else {
                json!({ "stringValue": s })
            }
        }
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(to_store_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Encode a plain JSON object into a `fields` map.
#[must_use]
pub fn encode_fields(map: &Map<String, Value>) -> Value {
    let mut fields = Map::new();
    for (key, value) in map {
        fields.insert(key.clone(), to_store_value(value));
    }
    Value::Object(fields)
}

/// Decode one typed envelope back into a plain JSON value.
///
/// # Errors
/// Returns [`StoreError::Decode`] when the envelope is not one of the known
/// value kinds.
pub fn from_store_value(value: &Value) -> StoreResult<Value> {
    let object = value
        .as_object()
        .ok_or_else(|| StoreError::Decode(format!("value is not an object: {value}")))?;

    let (kind, inner) = object
        .iter()
        .next()
        .ok_or_else(|| StoreError::Decode("empty value envelope".to_string()))?;

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => Ok(inner.clone()),
        "integerValue" => {
            let raw = inner
                .as_str()
                .map(str::to_owned)
                .or_else(|| inner.as_i64().map(|n| n.to_string()))
                .ok_or_else(|| StoreError::Decode(format!("bad integerValue: {inner}")))?;
            let parsed: i64 = raw
                .parse()
                .map_err(|_| StoreError::Decode(format!("bad integerValue: {raw}")))?;
            Ok(Value::from(parsed))
        }
        "doubleValue" => Ok(inner.clone()),
        "stringValue" | "timestampValue" | "referenceValue" => Ok(inner.clone()),
        "arrayValue" => {
            let items = inner
                .get("values")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let mut decoded = Vec::with_capacity(items.len());
            for item in items {
                decoded.push(from_store_value(item)?);
            }
            Ok(Value::Array(decoded))
        }
        "mapValue" => {
            let fields = inner.get("fields").and_then(Value::as_object);
            match fields {
                Some(map) => decode_fields(map).map(Value::Object),
                None => Ok(Value::Object(Map::new())),
            }
        }
        other => Err(StoreError::Decode(format!("unknown value kind: {other}"))),
    }
}

/// Decode a `fields` map back into a plain JSON object.
///
/// # Errors
/// Returns [`StoreError::Decode`] when any field envelope is malformed.
pub fn decode_fields(fields: &Map<String, Value>) -> StoreResult<Map<String, Value>> {
    let mut map = Map::new();
    for (key, value) in fields {
        map.insert(key.clone(), from_store_value(value)?);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_travel_as_strings() {
        let encoded = to_store_value(&json!(42));
        assert_eq!(encoded, json!({ "integerValue": "42" }));

        let decoded = from_store_value(&encoded).ok();
        assert_eq!(decoded, Some(json!(42)));
    }

    #[test]
    fn test_rfc3339_strings_become_timestamps() {
        let encoded = to_store_value(&json!("2025-04-02T09:30:00Z"));
        assert_eq!(encoded, json!({ "timestampValue": "2025-04-02T09:30:00Z" }));

        let plain = to_store_value(&json!("not a timestamp"));
        assert_eq!(plain, json!({ "stringValue": "not a timestamp" }));
    }

    #[test]
    fn test_nested_document_encoding() {
        let record = json!({
            "title": "Backend Engineer",
            "skills": ["rust", "sql"],
            "salary": { "min": 70000, "max": 90000, "currency": "EUR" },
            "companyLogo": null
        });
        let fields = record.as_object().map(encode_fields);
        assert!(fields.is_some());
        let fields = fields.unwrap_or_default();
        assert_eq!(
            fields.get("salary").and_then(|s| s.pointer("/mapValue/fields/min/integerValue")),
            Some(&json!("70000"))
        );
        assert_eq!(
            fields.pointer("/skills/arrayValue/values/0/stringValue"),
            Some(&json!("rust"))
        );
        assert_eq!(fields.get("companyLogo"), Some(&json!({ "nullValue": null })));
    }

    #[test]
    fn test_decode_rejects_unknown_kind() {
        let err = from_store_value(&json!({ "geoPointValue": {} }));
        assert!(matches!(err, Err(StoreError::Decode(_))));
    }

    #[test]
    fn test_empty_array_decodes() {
        let decoded = from_store_value(&json!({ "arrayValue": {} })).ok();
        assert_eq!(decoded, Some(json!([])));
    }
}
