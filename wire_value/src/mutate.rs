//! Structure mutator
//!
//! Walks arrays and objects and hands every leaf to a transform. Tokens and
//! payloads are leaves, never containers: the walk stops at them.

use crate::types::{Map, Value};
use std::rc::Rc;

/// Hook consulted before the default serialization of a leaf
///
/// Returning `Some` keeps that value verbatim and skips the JSON round-trip.
pub type Replacer = Rc<dyn Fn(&Value) -> Option<Value>>;

/// Apply `transform` to every leaf of `value`
///
/// - `Undefined` entries are removed from objects and become `Null` in arrays.
/// - Tokens are returned untouched; `transform` never sees them.
/// - Payloads, dates and scalars are passed to `transform` whole.
pub fn mutate<F>(value: Value, transform: &F) -> Value
where
    F: Fn(Value) -> Value,
{
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match mutate(item, transform) {
                    Value::Undefined => Value::Null,
                    other => other,
                })
                .collect(),
        ),
        Value::Object(map) => Value::Object(mutate_map(map, transform)),
        Value::Token(_) | Value::Undefined => value,
        leaf => transform(leaf),
    }
}

fn mutate_map<F>(map: Map, transform: &F) -> Map
where
    F: Fn(Value) -> Value,
{
    map.into_iter()
        .filter_map(|(key, value)| match mutate(value, transform) {
            Value::Undefined => None,
            other => Some((key, other)),
        })
        .collect()
}

/// Encode a leaf as wire JSON and decode it again
///
/// Dates collapse into ISO-8601 strings and payloads into their metadata.
pub fn json_round_trip(value: Value) -> Value {
    Value::from(value.to_json())
}

/// Serialize a call argument into its tree form
pub fn serialize(value: Value, replacer: Option<&Replacer>) -> Value {
    mutate(value, &|leaf| {
        if let Some(replaced) = replacer.and_then(|replace| replace(&leaf)) {
            return replaced;
        }
        json_round_trip(leaf)
    })
}

/// Replacer keeping binary payloads by reference
pub fn payload_passthrough() -> Replacer {
    Rc::new(|value: &Value| match value {
        Value::Payload(_) => Some(value.clone()),
        _ => None,
    })
}
