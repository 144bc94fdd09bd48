//! Node configuration
//!
//! This module provides the builder that describes a family of query nodes:
//! the root property, the terminal callback and the serialization settings
//! shared by every node derived from the same root.

use crate::node::chain::QueryNode;
use crate::node::item::QueryOptions;
use crate::node::verb::Verb;
use std::rc::Rc;
use wire_value::{Map, Replacer, Value};

/// Callback invoked with a finished tree when not batching
pub type TerminalCallback<R> = Rc<dyn Fn(Map, Option<QueryOptions>) -> R>;

/// Settings shared by all nodes derived from one root
pub(crate) struct Family<R> {
    pub(crate) root_property: Option<String>,
    pub(crate) callback: Option<TerminalCallback<R>>,
    pub(crate) default_value: Value,
    pub(crate) replacer: Option<Replacer>,
}

/// Builder for a root query node
pub struct NodeConfig<R> {
    root_property: Option<String>,
    callback: Option<TerminalCallback<R>>,
    default_value: Value,
    replacer: Option<Replacer>,
    initial: Option<Map>,
}

impl<R> NodeConfig<R> {
    pub fn new() -> Self {
        Self {
            root_property: None,
            callback: None,
            default_value: Value::Object(Map::new()),
            replacer: None,
            initial: None,
        }
    }

    /// Prefix every path with `property`
    pub fn root_property(mut self, property: impl Into<String>) -> Self {
        self.root_property = Some(property.into());
        self
    }

    /// Use a verb as root property
    pub fn verb(self, verb: Verb) -> Self {
        self.root_property(verb.as_str())
    }

    /// Invoke `callback` with finished trees outside of batches
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(Map, Option<QueryOptions>) -> R + 'static,
    {
        self.callback = Some(Rc::new(callback));
        self
    }

    /// Share an already constructed callback
    pub fn shared_callback(mut self, callback: TerminalCallback<R>) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Value written when a call receives no argument
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = value.into();
        self
    }

    /// Consult `replacer` before serializing leaves
    pub fn replacer(mut self, replacer: Replacer) -> Self {
        self.replacer = Some(replacer);
        self
    }

    /// Start from an existing tree instead of an empty one
    pub fn initial(mut self, tree: Map) -> Self {
        self.initial = Some(tree);
        self
    }

    /// Build the root node
    pub fn into_root(self) -> QueryNode<R> {
        crate::trace_log!(
            "creating root node (root property: {:?}, callback: {})",
            self.root_property,
            self.callback.is_some()
        );

        let family = Family {
            root_property: self.root_property,
            callback: self.callback,
            default_value: self.default_value,
            replacer: self.replacer,
        };
        QueryNode::from_parts(Rc::new(family), Vec::new(), self.initial, None)
    }
}

impl<R> Default for NodeConfig<R> {
    fn default() -> Self {
        Self::new()
    }
}
