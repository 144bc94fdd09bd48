//! Value definitions
//!
//! This module provides the tagged value model for instruction trees
//! and the conversions from plain Rust data.

use crate::payload::Payload;
use chrono::{DateTime, Utc};
use serde_json::Number;
use std::collections::BTreeMap;

/// Ordered mapping used for every object and every instruction tree
pub type Map = BTreeMap<String, Value>;

/// Opaque values that the compiler resolves itself
///
/// Tokens are atomic: nothing in this workspace walks into them.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Raw or computed expression text
    Expression(String),
    /// Back-reference to a field of the current model
    Field(String),
    /// Finished instruction tree embedded as an operand
    Query(Map),
}

/// A node of an instruction tree
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value at all; removed from objects during serialization
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Object(Map),
    Token(Token),
    Payload(Payload),
}

impl Value {
    /// Build an object from key/value pairs
    pub fn object<K, V, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Shorthand for an expression token
    pub fn expression(text: impl Into<String>) -> Self {
        Value::Token(Token::Expression(text.into()))
    }

    /// Shorthand for a field reference token
    pub fn field(name: impl Into<String>) -> Self {
        Value::Token(Token::Field(name.into()))
    }

    /// Shorthand for a sub-query token
    pub fn query(tree: Map) -> Self {
        Value::Token(Token::Query(tree))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Value::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn as_payload(&self) -> Option<&Payload> {
        match self {
            Value::Payload(payload) => Some(payload),
            _ => None,
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::String(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::String(val.to_string())
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(val: $ty) -> Self {
                    Value::Number(Number::from(val))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        // JSON has no representation for NaN or infinities
        Number::from_f64(val).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    fn from(val: f32) -> Self {
        Value::from(f64::from(val))
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(val: DateTime<Utc>) -> Self {
        Value::Date(val)
    }
}

impl From<Payload> for Value {
    fn from(val: Payload) -> Self {
        Value::Payload(val)
    }
}

impl From<Token> for Value {
    fn from(val: Token) -> Self {
        Value::Token(val)
    }
}

impl From<Map> for Value {
    fn from(val: Map) -> Self {
        Value::Object(val)
    }
}

impl From<Vec<Value>> for Value {
    fn from(val: Vec<Value>) -> Self {
        Value::Array(val)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
