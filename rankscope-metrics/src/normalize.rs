//! Shared decoding entry points for parsers.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Decodes an object payload, falling back to `T::default()` when the
/// payload is not an object or does not fit the schema.
pub fn object<T>(payload: &Value, label: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let candidate = match payload {
        Value::Object(_) => payload,
        Value::Array(items) => match items.first() {
            Some(first @ Value::Object(_)) if items.len() == 1 => first,
            _ => return unexpected(label, payload),
        },
        _ => return unexpected(label, payload),
    };

    T::deserialize(candidate).unwrap_or_else(|e| {
        warn!(payload = label, error = %e, "Payload did not match schema, using defaults");
        T::default()
    })
}

fn unexpected<T: Default>(label: &str, payload: &Value) -> T {
    if !payload.is_null() {
        warn!(payload = label, kind = kind(payload), "Unexpected payload shape, using defaults");
    }
    T::default()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Shape {
        n: u32,
    }

    #[test]
    fn test_object_shapes() {
        assert_eq!(object::<Shape>(&json!({"n": 3}), "t"), Shape { n: 3 });
        assert_eq!(object::<Shape>(&json!([{"n": 4}]), "t"), Shape { n: 4 });
        assert_eq!(object::<Shape>(&json!([{"n": 4}, {"n": 5}]), "t"), Shape::default());
        assert_eq!(object::<Shape>(&json!("oops"), "t"), Shape::default());
        assert_eq!(object::<Shape>(&json!({"n": "bad"}), "t"), Shape::default());
    }
}
