//! Field primitives
//!
//! Every primitive is a callback-less node family whose tree starts as
//! `{ "type": <kind> }`. Chained attributes extend that tree, so
//! `string().step("required").invoke()` describes a required string field.

use std::fmt;

use query_node::{NodeConfig, Outcome, QueryNode};
use wire_value::{Map, Value};

/// Column types understood by the compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Date,
    Json,
    Blob,
    Link,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Json => "json",
            FieldKind::Blob => "blob",
            FieldKind::Link => "link",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root node of a field primitive
///
/// Zero-argument calls write `default_value`.
pub fn primitive(kind: FieldKind, default_value: bool) -> QueryNode<()> {
    let initial = Map::from([("type".to_string(), Value::from(kind.as_str()))]);
    NodeConfig::new()
        .initial(initial)
        .default_value(default_value)
        .into_root()
}

pub fn string() -> QueryNode<()> {
    primitive(FieldKind::String, true)
}

pub fn number() -> QueryNode<()> {
    primitive(FieldKind::Number, true)
}

pub fn boolean() -> QueryNode<()> {
    primitive(FieldKind::Boolean, true)
}

pub fn date() -> QueryNode<()> {
    primitive(FieldKind::Date, true)
}

pub fn json() -> QueryNode<()> {
    primitive(FieldKind::Json, true)
}

pub fn blob() -> QueryNode<()> {
    primitive(FieldKind::Blob, true)
}

pub fn link() -> QueryNode<()> {
    primitive(FieldKind::Link, true)
}

/// Attributes of one field, as built by a primitive chain
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDefinition(Map);

impl FieldDefinition {
    pub fn kind(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.0.get(attribute)
    }

    pub fn into_map(self) -> Map {
        self.0
    }
}

impl From<Map> for FieldDefinition {
    fn from(attributes: Map) -> Self {
        FieldDefinition(attributes)
    }
}

impl From<QueryNode<()>> for FieldDefinition {
    fn from(node: QueryNode<()>) -> Self {
        node.into_item()
            .map(|item| FieldDefinition(item.structure))
            .unwrap_or_default()
    }
}

impl From<Outcome<()>> for FieldDefinition {
    fn from(outcome: Outcome<()>) -> Self {
        outcome
            .into_item()
            .map(|item| FieldDefinition(item.structure))
            .unwrap_or_default()
    }
}

impl From<FieldDefinition> for Value {
    fn from(definition: FieldDefinition) -> Self {
        Value::Object(definition.0)
    }
}
