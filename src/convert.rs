//! Conversions between [`Value`] and `serde_json::Value`, so hosts can
//! build contexts straight from JSON documents and ship results back out.

use std::collections::HashMap;

use crate::value::{Context, Value};

/// Convert a JSON document into an expression value. Whole numbers become
/// integers, everything else keeps its kind.
pub fn from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => Value::Array(items.into_iter().map(from_json).collect()),
        serde_json::Value::Object(map) => Value::Object(
            map.into_iter().map(|(k, v)| (k, from_json(v))).collect(),
        ),
    }
}

/// Build a context from a JSON object. Returns `None` for any other JSON
/// kind.
pub fn context_from_json(json: serde_json::Value) -> Option<Context> {
    match json {
        serde_json::Value::Object(map) => Some(
            map.into_iter()
                .map(|(k, v)| (k, from_json(v)))
                .collect::<HashMap<_, _>>(),
        ),
        _ => None,
    }
}

/// Convert an expression value back to JSON. Dates serialize as ISO-8601
/// strings; functions have no JSON form, so they yield `None`. Non-finite
/// floats degrade to null, as serde_json has no representation for them.
pub fn to_json(value: &Value) -> Option<serde_json::Value> {
    match value {
        Value::Null => Some(serde_json::Value::Null),
        Value::Boolean(b) => Some(serde_json::Value::Bool(*b)),
        Value::Integer(n) => Some(serde_json::Value::from(*n)),
        Value::Float(x) => Some(
            serde_json::Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        ),
        Value::String(s) => Some(serde_json::Value::String(s.clone())),
        Value::Array(items) => items
            .iter()
            .map(to_json)
            .collect::<Option<Vec<_>>>()
            .map(serde_json::Value::Array),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| to_json(v).map(|v| (k.clone(), v)))
            .collect::<Option<serde_json::Map<_, _>>>()
            .map(serde_json::Value::Object),
        Value::Date(d) => Some(serde_json::Value::String(d.to_string())),
        Value::Function(_) => None,
    }
}
