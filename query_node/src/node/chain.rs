//! Query node
//!
//! A node is an immutable snapshot of a chain: the steps taken since the last
//! call and the tree built so far. Stepping and calling never modify a node;
//! they return new ones, so chains branching off the same node stay
//! independent.

use crate::batch::{self, BatchScope};
use crate::fields::{wrap_expressions, FieldProxy};
use crate::node::config::Family;
use crate::node::item::{QueryItem, QueryOptions};
use crate::node::outcome::Outcome;
use std::fmt;
use std::rc::Rc;
use wire_value::{path, serialize, Map, Value};

pub struct QueryNode<R> {
    family: Rc<Family<R>>,
    path: Vec<String>,
    fragment: Option<Map>,
    options: Option<QueryOptions>,
}

impl<R> QueryNode<R> {
    pub(crate) fn from_parts(
        family: Rc<Family<R>>,
        path: Vec<String>,
        fragment: Option<Map>,
        options: Option<QueryOptions>,
    ) -> Self {
        Self {
            family,
            path,
            fragment,
            options,
        }
    }

    /// Extend the path by `name`
    pub fn step(&self, name: impl AsRef<str>) -> Self {
        let mut path = self.path.clone();
        path.push(name.as_ref().to_string());

        Self {
            family: Rc::clone(&self.family),
            path,
            fragment: self.fragment.clone(),
            options: self.options.clone(),
        }
    }

    /// Terminate the chain with `argument`
    pub fn call(&self, argument: impl Into<Value>) -> Outcome<R> {
        self.apply(argument.into(), None)
    }

    /// Terminate the chain with `argument` and forward `options`
    pub fn call_with_options(
        &self,
        argument: impl Into<Value>,
        options: QueryOptions,
    ) -> Outcome<R> {
        self.apply(argument.into(), Some(options))
    }

    /// Terminate the chain without an argument
    ///
    /// The family's default value is written at the current path.
    pub fn invoke(&self) -> Outcome<R> {
        self.apply(Value::Undefined, None)
    }

    /// Terminate the chain with the value computed by `build`
    ///
    /// `build` runs inside a batch scope, so queries it constructs come back
    /// as trees instead of being executed. Those trees are embedded as
    /// sub-queries and interpolated field references become expressions.
    pub fn call_with<F, T>(&self, build: F) -> Outcome<R>
    where
        F: FnOnce(&FieldProxy) -> T,
        T: Into<Value>,
    {
        let value = {
            let _scope = BatchScope::enter();
            build(&FieldProxy).into()
        };
        self.apply(wrap_expressions(value), None)
    }

    /// Fallible form of [`QueryNode::call_with`]
    ///
    /// An error from `build` is returned as is, after the batch flag has been
    /// restored.
    pub fn try_call_with<F, T, E>(&self, build: F) -> Result<Outcome<R>, E>
    where
        F: FnOnce(&FieldProxy) -> Result<T, E>,
        T: Into<Value>,
    {
        let value = {
            let _scope = BatchScope::enter();
            build(&FieldProxy)?.into()
        };
        Ok(self.apply(wrap_expressions(value), None))
    }

    /// Steps taken since the last call
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Tree built by earlier calls of this chain
    pub fn fragment(&self) -> Option<&Map> {
        self.fragment.as_ref()
    }

    pub fn options(&self) -> Option<&QueryOptions> {
        self.options.as_ref()
    }

    /// Whether terminal calls on this node can reach a callback
    pub fn has_callback(&self) -> bool {
        self.family.callback.is_some()
    }

    pub fn root_property(&self) -> Option<&str> {
        self.family.root_property.as_deref()
    }

    /// Finished tree and options, if any call happened
    pub fn into_item(self) -> Option<QueryItem> {
        let options = self.options;
        self.fragment.map(|structure| QueryItem { structure, options })
    }

    fn apply(&self, argument: Value, options: Option<QueryOptions>) -> Outcome<R> {
        let argument = serialize(argument, self.family.replacer.as_ref());
        let value = if argument.is_undefined() {
            self.family.default_value.clone()
        } else {
            argument
        };

        let mut tree = self.fragment.clone().unwrap_or_default();
        let joined = self.path.join(".");

        if path::segments(&joined).is_empty() {
            self.merge_root(&mut tree, value);
        } else {
            let full = match &self.family.root_property {
                Some(root) => format!("{root}.{joined}"),
                None => joined,
            };
            crate::trace_log!("setting `{}`", full);
            path::set_property(&mut tree, &full, value);
        }

        match &self.family.callback {
            Some(callback) if !batch::is_batching() => {
                crate::debug_log!(
                    "resolving query (root property: {:?})",
                    self.family.root_property
                );
                Outcome::Resolved(callback(tree, options))
            }
            _ => {
                let mut path = self.path.clone();
                path.pop();
                Outcome::Pending(Self {
                    family: Rc::clone(&self.family),
                    path,
                    fragment: Some(tree),
                    options,
                })
            }
        }
    }

    /// Merge `value` into the level addressed by the root property
    fn merge_root(&self, tree: &mut Map, value: Value) {
        match (value, &self.family.root_property) {
            (Value::Object(entries), Some(root)) => {
                let slot = tree
                    .entry(root.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !matches!(slot, Value::Object(_)) {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(level) = slot {
                    level.extend(entries);
                }
            }
            (Value::Object(entries), None) => tree.extend(entries),
            (other, Some(root)) => {
                tree.insert(root.clone(), other);
            }
            (other, None) => {
                tracing::warn!(
                    "dropping non-object value merged into the tree root: {}",
                    other.to_json()
                );
            }
        }
    }
}

impl<R> Clone for QueryNode<R> {
    fn clone(&self) -> Self {
        Self {
            family: Rc::clone(&self.family),
            path: self.path.clone(),
            fragment: self.fragment.clone(),
            options: self.options.clone(),
        }
    }
}

impl<R> fmt::Debug for QueryNode<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryNode")
            .field("root_property", &self.family.root_property)
            .field("path", &self.path)
            .field("fragment", &self.fragment)
            .field("options", &self.options)
            .field("bound", &self.family.callback.is_some())
            .finish()
    }
}
