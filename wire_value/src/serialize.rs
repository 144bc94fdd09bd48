//! Serialization utilities
//!
//! This module renders values in the wire format expected by the compiler
//! and parses wire JSON back into tagged values.

use crate::symbols::{self, EXPRESSION, QUERY};
use crate::types::{Map, Token, Value};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// Render a date the way `Date.prototype.toISOString` does
pub fn iso_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Token {
    /// Wire shape of the token
    pub fn to_json(&self) -> serde_json::Value {
        let mut wrapper = serde_json::Map::new();
        match self {
            Token::Expression(text) => {
                wrapper.insert(EXPRESSION.to_string(), serde_json::Value::from(text.as_str()));
            }
            Token::Field(name) => {
                wrapper.insert(
                    EXPRESSION.to_string(),
                    serde_json::Value::from(symbols::field_text(name)),
                );
            }
            Token::Query(tree) => {
                wrapper.insert(QUERY.to_string(), map_to_json(tree));
            }
        }
        serde_json::Value::Object(wrapper)
    }
}

impl Value {
    /// Wire shape of the value
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Undefined | Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Date(date) => serde_json::Value::String(iso_timestamp(date)),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Object(map) => map_to_json(map),
            Value::Token(token) => token.to_json(),
            Value::Payload(payload) => payload.metadata(),
        }
    }
}

/// Wire shape of a whole tree; `Undefined` entries are left out
pub fn map_to_json(map: &Map) -> serde_json::Value {
    serde_json::Value::Object(
        map.iter()
            .filter(|(_, value)| !value.is_undefined())
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect(),
    )
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Token::Expression(text) => map.serialize_entry(EXPRESSION, text)?,
            Token::Field(name) => map.serialize_entry(EXPRESSION, &symbols::field_text(name))?,
            Token::Query(tree) => map.serialize_entry(QUERY, &ObjectRef(tree))?,
        }
        map.end()
    }
}

struct ObjectRef<'a>(&'a Map);

impl Serialize for ObjectRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let defined = self.0.iter().filter(|(_, value)| !value.is_undefined());
        let mut map = serializer.serialize_map(Some(defined.clone().count()))?;
        for (key, value) in defined {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Date(date) => serializer.serialize_str(&iso_timestamp(date)),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => ObjectRef(map).serialize(serializer),
            Value::Token(token) => token.serialize(serializer),
            Value::Payload(payload) => payload.metadata().serialize(serializer),
        }
    }
}

/// Parse wire JSON, turning sentinel wrappers back into tokens
impl From<serde_json::Value> for Value {
    fn from(val: serde_json::Value) -> Self {
        match val {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(object) => match token_from_wire(object) {
                Ok(token) => Value::Token(token),
                Err(object) => Value::Object(
                    object
                        .into_iter()
                        .map(|(key, value)| (key, Value::from(value)))
                        .collect(),
                ),
            },
        }
    }
}

fn token_from_wire(
    mut object: serde_json::Map<String, serde_json::Value>,
) -> Result<Token, serde_json::Map<String, serde_json::Value>> {
    if object.len() != 1 {
        return Err(object);
    }

    match object.get(EXPRESSION) {
        Some(serde_json::Value::String(text)) => {
            let token = match symbols::parse_field_text(text) {
                Some(name) => Token::Field(name.to_string()),
                None => Token::Expression(text.clone()),
            };
            return Ok(token);
        }
        Some(_) => return Err(object),
        None => {}
    }

    match object.remove(QUERY) {
        Some(serde_json::Value::Object(tree)) => Ok(Token::Query(
            tree.into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        )),
        Some(other) => {
            object.insert(QUERY.to_string(), other);
            Err(object)
        }
        None => Err(object),
    }
}
