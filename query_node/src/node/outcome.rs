use crate::errors::QueryError;
use crate::node::chain::QueryNode;
use crate::node::item::QueryItem;
use wire_value::{Map, Value};

/// Result of a terminal call
///
/// Outside of batches a bound node resolves through its callback. Inside a
/// batch, or without a callback, the call yields a node that can be chained
/// further or collected.
#[derive(Debug)]
pub enum Outcome<R> {
    Pending(QueryNode<R>),
    Resolved(R),
}

impl<R> Outcome<R> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending(_))
    }

    pub fn as_node(&self) -> Option<&QueryNode<R>> {
        match self {
            Outcome::Pending(node) => Some(node),
            Outcome::Resolved(_) => None,
        }
    }

    pub fn into_node(self) -> Result<QueryNode<R>, QueryError> {
        match self {
            Outcome::Pending(node) => Ok(node),
            Outcome::Resolved(_) => Err(QueryError::ChainResolved),
        }
    }

    /// Continue the chain of a pending outcome
    pub fn step(&self, name: impl AsRef<str>) -> Result<QueryNode<R>, QueryError> {
        self.pending().map(|node| node.step(name))
    }

    /// Call a pending outcome's node again, merging into the same tree
    pub fn call(&self, argument: impl Into<Value>) -> Result<Outcome<R>, QueryError> {
        self.pending().map(|node| node.call(argument))
    }

    pub fn invoke(&self) -> Result<Outcome<R>, QueryError> {
        self.pending().map(QueryNode::invoke)
    }

    /// Tree of a pending outcome
    pub fn tree(&self) -> Option<&Map> {
        self.as_node().and_then(QueryNode::fragment)
    }

    pub fn into_item(self) -> Option<QueryItem> {
        match self {
            Outcome::Pending(node) => node.into_item(),
            Outcome::Resolved(_) => None,
        }
    }

    pub fn into_resolved(self) -> Option<R> {
        match self {
            Outcome::Pending(_) => None,
            Outcome::Resolved(value) => Some(value),
        }
    }

    fn pending(&self) -> Result<&QueryNode<R>, QueryError> {
        self.as_node().ok_or(QueryError::ChainResolved)
    }
}
