//! Batch collector
//!
//! Runs a group of query constructions with the batch flag set and gathers
//! the resulting trees in order, ready to be sent to the compiler as one
//! transaction.

use crate::batch::with_batching;
use crate::node::{Outcome, QueryItem, QueryNode};
use wire_value::{Map, Value};

/// One entry of a collected batch
#[derive(Debug, Clone, PartialEq)]
pub enum BatchItem {
    /// A tree built by a query node
    Query(QueryItem),
    /// Any other value, kept in place
    Passthrough(Value),
}

impl BatchItem {
    pub fn query(&self) -> Option<&QueryItem> {
        match self {
            BatchItem::Query(item) => Some(item),
            BatchItem::Passthrough(_) => None,
        }
    }

    pub fn into_query(self) -> Option<QueryItem> {
        match self {
            BatchItem::Query(item) => Some(item),
            BatchItem::Passthrough(_) => None,
        }
    }

    /// Wire JSON of the item
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            BatchItem::Query(item) => {
                let mut json = serde_json::Map::new();
                json.insert("structure".into(), item.to_json());
                if let Some(options) = &item.options {
                    json.insert("options".into(), serde_json::Value::Object(options.clone()));
                }
                serde_json::Value::Object(json)
            }
            BatchItem::Passthrough(value) => value.to_json(),
        }
    }
}

impl From<QueryItem> for BatchItem {
    fn from(item: QueryItem) -> Self {
        BatchItem::Query(item)
    }
}

impl From<Value> for BatchItem {
    fn from(value: Value) -> Self {
        BatchItem::Passthrough(value)
    }
}

impl<R> From<QueryNode<R>> for BatchItem {
    fn from(node: QueryNode<R>) -> Self {
        match node.into_item() {
            Some(item) => BatchItem::Query(item),
            None => BatchItem::Passthrough(Value::Undefined),
        }
    }
}

impl<R: Into<Value>> From<Outcome<R>> for BatchItem {
    fn from(outcome: Outcome<R>) -> Self {
        match outcome {
            Outcome::Pending(node) => node.into(),
            Outcome::Resolved(value) => BatchItem::Passthrough(value.into()),
        }
    }
}

impl<T: Into<BatchItem>> From<Option<T>> for BatchItem {
    fn from(entry: Option<T>) -> Self {
        match entry {
            Some(entry) => entry.into(),
            None => BatchItem::Passthrough(Value::Null),
        }
    }
}

/// Evaluate `operations` inside a batch and collect their results
pub fn collect<F, I>(operations: F) -> Vec<BatchItem>
where
    F: FnOnce() -> I,
    I: IntoIterator,
    I::Item: Into<BatchItem>,
{
    let items: Vec<BatchItem> =
        with_batching(|| operations().into_iter().map(Into::into).collect());

    crate::debug_log!("collected {} batch item(s)", items.len());
    items
}

/// Fallible form of [`collect`]
pub fn try_collect<F, I, E>(operations: F) -> Result<Vec<BatchItem>, E>
where
    F: FnOnce() -> Result<I, E>,
    I: IntoIterator,
    I::Item: Into<BatchItem>,
{
    let items: Vec<BatchItem> =
        with_batching(|| operations().map(|items| items.into_iter().map(Into::into).collect()))?;

    crate::debug_log!("collected {} batch item(s)", items.len());
    Ok(items)
}

/// Collect `operations` and hand the batch to `handler`
///
/// `handler` runs after the batch flag has been restored.
pub fn run_batch<F, I, H, T>(operations: F, handler: H) -> T
where
    F: FnOnce() -> I,
    I: IntoIterator,
    I::Item: Into<BatchItem>,
    H: FnOnce(Vec<BatchItem>) -> T,
{
    handler(collect(operations))
}

/// Collect `operations` and keep only the trees
pub fn serialize_queries<F, I>(operations: F) -> Vec<Map>
where
    F: FnOnce() -> I,
    I: IntoIterator,
    I::Item: Into<BatchItem>,
{
    collect(operations)
        .into_iter()
        .filter_map(BatchItem::into_query)
        .map(|item| item.structure)
        .collect()
}
