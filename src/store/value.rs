//! JSON → Firestore typed-value encoding
//!
//! The Firestore REST API requires every field to be wrapped in a typed
//! value envelope (`stringValue`, `integerValue`, ...). Integers are carried
//! as strings per the API's int64 encoding; integers outside the i64 range
//! fall back to `doubleValue`.

use serde_json::{json, Map, Value};

/// Encode a document's fields into the REST `fields` map.
pub fn encode_fields(fields: &Map<String, Value>) -> Value {
    let encoded: Map<String, Value> = fields
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect();
    Value::Object(encoded)
}

/// Encode a single JSON value into its Firestore typed envelope.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else {
                // u64 beyond i64::MAX or a float
                json!({ "doubleValue": n.as_f64() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}
