//! Sub-query embedding
//!
//! Pending nodes used as values turn into sub-query tokens carrying their
//! tree, so `add.accounts.to(() => get.oldAccounts())` style arguments nest
//! one query inside another.

use crate::node::{Outcome, QueryItem, QueryNode};
use wire_value::Value;

impl<R> From<QueryNode<R>> for Value {
    fn from(node: QueryNode<R>) -> Self {
        match node.into_item() {
            Some(item) => item.into(),
            None => Value::Undefined,
        }
    }
}

impl From<QueryItem> for Value {
    fn from(item: QueryItem) -> Self {
        Value::query(item.structure)
    }
}

impl<R: Into<Value>> From<Outcome<R>> for Value {
    fn from(outcome: Outcome<R>) -> Self {
        match outcome {
            Outcome::Pending(node) => node.into(),
            Outcome::Resolved(value) => value.into(),
        }
    }
}
