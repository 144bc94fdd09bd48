//! Model builder
//!
//! Describes a model the way `create.model(...)` expects it: nested field
//! groups flatten into dotted slugs, trigger effects are collected as bare
//! query trees and presets become `{ slug, instructions }` entries.

use query_node::{BatchItem, serialize_queries};
use serde::{Serialize, Serializer};
use wire_value::{Map, Value};

use crate::schema::primitives::FieldDefinition;

#[derive(Debug, Clone, PartialEq)]
enum FieldEntry {
    Field(FieldDefinition),
    Group(FieldGroup),
}

/// Fields nested under a common slug prefix
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldGroup {
    entries: Vec<(String, FieldEntry)>,
}

impl FieldGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, slug: impl Into<String>, definition: impl Into<FieldDefinition>) -> Self {
        self.entries
            .push((slug.into(), FieldEntry::Field(definition.into())));
        self
    }

    pub fn group(mut self, slug: impl Into<String>, group: FieldGroup) -> Self {
        self.entries.push((slug.into(), FieldEntry::Group(group)));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// One column of an index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexField {
    pub slug: String,
    pub order: Option<SortOrder>,
    pub collation: Option<String>,
}

impl IndexField {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            order: None,
            collation: None,
        }
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("slug".into(), Value::from(self.slug.as_str()));
        if let Some(order) = self.order {
            map.insert("order".into(), Value::from(order.as_str()));
        }
        if let Some(collation) = &self.collation {
            map.insert("collation".into(), Value::from(collation.as_str()));
        }
        Value::Object(map)
    }
}

impl From<&str> for IndexField {
    fn from(slug: &str) -> Self {
        IndexField::new(slug)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Index {
    fields: Vec<IndexField>,
    unique: bool,
    filter: Option<Value>,
}

impl Index {
    pub fn new<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<IndexField>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            unique: false,
            filter: None,
        }
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Restrict the index to records matching `filter`
    pub fn filter(mut self, filter: impl Into<Value>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "fields".into(),
            Value::Array(self.fields.iter().map(IndexField::to_value).collect()),
        );
        map.insert("unique".into(), Value::from(self.unique));
        if let Some(filter) = &self.filter {
            map.insert("filter".into(), filter.clone());
        }
        Value::Object(map)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerTiming {
    Before,
    During,
    After,
}

impl TriggerTiming {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerTiming::Before => "BEFORE",
            TriggerTiming::During => "DURING",
            TriggerTiming::After => "AFTER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    Insert,
    Update,
    Delete,
}

impl TriggerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerAction::Insert => "INSERT",
            TriggerAction::Update => "UPDATE",
            TriggerAction::Delete => "DELETE",
        }
    }
}

/// Queries run by the database when records change
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    timing: TriggerTiming,
    action: TriggerAction,
    fields: Vec<String>,
    effects: Vec<Map>,
    filter: Option<Value>,
}

impl Trigger {
    pub fn new(timing: TriggerTiming, action: TriggerAction) -> Self {
        Self {
            timing,
            action,
            fields: Vec::new(),
            effects: Vec::new(),
            filter: None,
        }
    }

    /// Only fire when one of `fields` changes
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Collect the effect queries built by `operations`
    ///
    /// The queries are never executed; their trees are stored instead.
    pub fn effects<F, I>(mut self, operations: F) -> Self
    where
        F: FnOnce() -> I,
        I: IntoIterator,
        I::Item: Into<BatchItem>,
    {
        self.effects = serialize_queries(operations);
        self
    }

    pub fn filter(mut self, filter: impl Into<Value>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("when".into(), Value::from(self.timing.as_str()));
        map.insert("action".into(), Value::from(self.action.as_str()));
        map.insert(
            "effects".into(),
            Value::Array(self.effects.iter().cloned().map(Value::Object).collect()),
        );
        if !self.fields.is_empty() {
            let fields = self
                .fields
                .iter()
                .map(|slug| Value::object([("slug", slug.as_str())]))
                .collect();
            map.insert("fields".into(), Value::Array(fields));
        }
        if let Some(filter) = &self.filter {
            map.insert("filter".into(), filter.clone());
        }
        Value::Object(map)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Identifiers {
    name: String,
    slug: String,
}

/// Model definition passed to schema queries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    slug: String,
    plural_slug: Option<String>,
    name: Option<String>,
    plural_name: Option<String>,
    identifiers: Option<Identifiers>,
    id_prefix: Option<String>,
    fields: Vec<(String, FieldEntry)>,
    indexes: Vec<Index>,
    triggers: Vec<Trigger>,
    presets: Vec<(String, Value)>,
}

impl Model {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Self::default()
        }
    }

    pub fn plural_slug(mut self, plural_slug: impl Into<String>) -> Self {
        self.plural_slug = Some(plural_slug.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn plural_name(mut self, plural_name: impl Into<String>) -> Self {
        self.plural_name = Some(plural_name.into());
        self
    }

    /// Fields used to label records of this model
    pub fn identifiers(mut self, name: impl Into<String>, slug: impl Into<String>) -> Self {
        self.identifiers = Some(Identifiers {
            name: name.into(),
            slug: slug.into(),
        });
        self
    }

    pub fn id_prefix(mut self, id_prefix: impl Into<String>) -> Self {
        self.id_prefix = Some(id_prefix.into());
        self
    }

    pub fn field(mut self, slug: impl Into<String>, definition: impl Into<FieldDefinition>) -> Self {
        self.fields
            .push((slug.into(), FieldEntry::Field(definition.into())));
        self
    }

    /// Add fields whose slugs are prefixed with `slug`
    pub fn group(mut self, slug: impl Into<String>, group: FieldGroup) -> Self {
        self.fields.push((slug.into(), FieldEntry::Group(group)));
        self
    }

    pub fn index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Named instructions reusable by queries on this model
    pub fn preset(mut self, slug: impl Into<String>, instructions: impl Into<Value>) -> Self {
        self.presets.push((slug.into(), instructions.into()));
        self
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Fields with nested groups flattened into dotted slugs
    pub fn serialized_fields(&self) -> Vec<Value> {
        let mut fields = Vec::new();
        flatten_fields(None, &self.fields, &mut fields);
        fields
    }

    pub fn to_json(&self) -> serde_json::Value {
        Value::from(self.clone()).to_json()
    }
}

fn flatten_fields(prefix: Option<&str>, entries: &[(String, FieldEntry)], out: &mut Vec<Value>) {
    for (slug, entry) in entries {
        let slug = match prefix {
            Some(prefix) => format!("{prefix}.{slug}"),
            None => slug.clone(),
        };
        match entry {
            FieldEntry::Field(definition) => out.push(serialize_field(slug, definition)),
            FieldEntry::Group(group) => flatten_fields(Some(&slug), &group.entries, out),
        }
    }
}

fn serialize_field(slug: String, definition: &FieldDefinition) -> Value {
    let mut map = definition.clone().into_map();
    map.insert("slug".into(), Value::from(slug));
    map.entry("unique".into()).or_insert(Value::Bool(false));
    map.entry("required".into()).or_insert(Value::Bool(false));
    Value::Object(map)
}

fn insert_optional(map: &mut Map, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        map.insert(key.into(), Value::from(value.as_str()));
    }
}

impl From<Model> for Value {
    fn from(model: Model) -> Self {
        let mut map = Map::new();
        map.insert("slug".into(), Value::from(model.slug.as_str()));
        insert_optional(&mut map, "pluralSlug", &model.plural_slug);
        insert_optional(&mut map, "name", &model.name);
        insert_optional(&mut map, "pluralName", &model.plural_name);
        if let Some(identifiers) = &model.identifiers {
            map.insert(
                "identifiers".into(),
                Value::object([
                    ("name", identifiers.name.as_str()),
                    ("slug", identifiers.slug.as_str()),
                ]),
            );
        }
        insert_optional(&mut map, "idPrefix", &model.id_prefix);

        map.insert("fields".into(), Value::Array(model.serialized_fields()));

        if !model.indexes.is_empty() {
            let indexes = model.indexes.iter().map(Index::to_value).collect();
            map.insert("indexes".into(), Value::Array(indexes));
        }
        if !model.triggers.is_empty() {
            let triggers = model.triggers.iter().map(Trigger::to_value).collect();
            map.insert("triggers".into(), Value::Array(triggers));
        }
        if !model.presets.is_empty() {
            let presets = model
                .presets
                .into_iter()
                .map(|(slug, instructions)| {
                    Value::object([("slug", Value::from(slug)), ("instructions", instructions)])
                })
                .collect();
            map.insert("presets".into(), Value::Array(presets));
        }

        Value::Object(map)
    }
}

impl Serialize for Model {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Value::from(self.clone()).serialize(serializer)
    }
}
