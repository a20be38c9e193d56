//! Lenient field deserializers for provider payloads.
//!
//! The provider is inconsistent about types: counts arrive as numbers,
//! numeric strings, or null depending on the endpoint and the day. Every
//! helper here accepts all of those and falls back to the zero value
//! instead of failing the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

// ============================================================================
// Value Coercion
// ============================================================================

/// Coerces a JSON value to a float. Unparseable values become 0.
pub fn as_f64(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().replace(',', "").parse().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Coerces a JSON value to a non-negative integer, rounding fractions.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn as_u64(value: &Value) -> u64 {
    if let Some(n) = value.as_u64() {
        return n;
    }
    let n = as_f64(value);
    if n <= 0.0 { 0 } else { n.round().min(u64::MAX as f64) as u64 }
}

/// Coerces a JSON value to a `u32`, saturating.
pub fn as_u32(value: &Value) -> u32 {
    u32::try_from(as_u64(value)).unwrap_or(u32::MAX)
}

/// Coerces a JSON value to text. Numbers are formatted, null is empty.
pub fn as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Coerces a JSON value to a flag.
pub fn as_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(_) => as_f64(value) != 0.0,
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
        _ => false,
    }
}

// ============================================================================
// Serde Adapters
// ============================================================================

/// `deserialize_with` adapter for `u64` fields.
pub fn u64<'de, D: Deserializer<'de>>(d: D) -> Result<u64, D::Error> {
    Value::deserialize(d).map(|v| as_u64(&v))
}

/// `deserialize_with` adapter for `u32` fields.
pub fn u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Value::deserialize(d).map(|v| as_u32(&v))
}

/// `deserialize_with` adapter for `f64` fields.
pub fn f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Value::deserialize(d).map(|v| as_f64(&v))
}

/// `deserialize_with` adapter for `String` fields.
pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Value::deserialize(d).map(|v| as_string(&v))
}

/// `deserialize_with` adapter for `bool` fields.
pub fn bool<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Value::deserialize(d).map(|v| as_bool(&v))
}

/// `deserialize_with` adapter for optional counts. Null and unparseable
/// values are `None`.
pub fn opt_u64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match &value {
        Value::Null => None,
        Value::String(s) if s.trim().replace(',', "").parse::<f64>().is_err() => None,
        other => Some(as_u64(other)),
    })
}

/// `deserialize_with` adapter for optional text. Null and empty strings
/// are `None`.
pub fn opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(Some(as_string(&value)).filter(|s| !s.is_empty()))
}

/// `deserialize_with` adapter for optional string lists. Non-string items
/// are skipped; anything but an array is `None`.
pub fn opt_strings<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<String>>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(value.as_array().map(|items| {
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect()
    }))
}

/// `deserialize_with` adapter for record lists. Items that are not objects
/// of the expected shape are dropped; anything but an array is empty.
pub fn seq<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(d)?;
    Ok(records(&value))
}

// ============================================================================
// Payload Helpers
// ============================================================================

/// Decodes every well-formed record in a JSON array.
pub fn records<T: DeserializeOwned>(value: &Value) -> Vec<T> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match T::deserialize(item) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "Dropping malformed record");
                None
            }
        })
        .collect()
}

/// Returns the row list of a payload that is either a bare array or an
/// object holding the rows under `field` (or `data`).
pub fn rows<'a>(payload: &'a Value, field: &str) -> &'a Value {
    if payload.is_array() {
        return payload;
    }
    match payload.get(field) {
        Some(rows) if rows.is_array() => rows,
        _ => payload.get("data").unwrap_or(&Value::Null),
    }
}
