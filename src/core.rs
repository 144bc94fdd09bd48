//! Core RONIN syntax functionality
//!
//! This module contains the main Syntax struct and its implementation,
//! providing one query root per verb bound to a shared terminal callback.

use std::collections::BTreeMap;
use std::rc::Rc;

use query_node::{
    BatchItem, NodeConfig, QueryNode, QueryOptions, TerminalCallback, Verb, collector,
};
use syntax_config::{AppConfig, QueryConfig};
use wire_value::{Map, Value, payload_passthrough};

use crate::errors::RoninError;
use crate::schema::{FieldKind, primitive};

/// Main coordinator owning the query roots
pub struct Syntax<R> {
    roots: BTreeMap<Verb, QueryNode<R>>,
    config: AppConfig,
}

impl<R> Syntax<R> {
    /// Create roots for every verb with the default configuration
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Map, Option<QueryOptions>) -> R + 'static,
    {
        let config = AppConfig::default();
        let callback: TerminalCallback<R> = Rc::new(callback);
        let roots = Verb::ALL
            .into_iter()
            .map(|verb| (verb, build_root(verb, &callback, &config.query)))
            .collect();

        Self { roots, config }
    }

    /// Create roots for the verbs listed in `config`
    pub fn with_config<F>(callback: F, config: AppConfig) -> Result<Self, RoninError>
    where
        F: Fn(Map, Option<QueryOptions>) -> R + 'static,
    {
        config.validate()?;

        let callback: TerminalCallback<R> = Rc::new(callback);
        let mut roots = BTreeMap::new();
        for name in &config.query.root_verbs {
            let verb: Verb = name.parse()?;
            roots.insert(verb, build_root(verb, &callback, &config.query));
        }

        crate::debug_log!("created {} query root(s)", roots.len());
        Ok(Self { roots, config })
    }

    /// Load configuration from the environment, then create the roots
    pub fn from_env<F>(callback: F) -> Result<Self, RoninError>
    where
        F: Fn(Map, Option<QueryOptions>) -> R + 'static,
    {
        let config = AppConfig::load()?;
        Self::with_config(callback, config)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Verbs that have a root
    pub fn verbs(&self) -> Vec<Verb> {
        self.roots.keys().copied().collect()
    }

    /// Get the root of `verb`
    pub fn root(&self, verb: Verb) -> Result<&QueryNode<R>, RoninError> {
        self.roots
            .get(&verb)
            .ok_or(RoninError::RootNotConfigured(verb))
    }

    pub fn get(&self) -> Result<&QueryNode<R>, RoninError> {
        self.root(Verb::Get)
    }

    pub fn set(&self) -> Result<&QueryNode<R>, RoninError> {
        self.root(Verb::Set)
    }

    pub fn add(&self) -> Result<&QueryNode<R>, RoninError> {
        self.root(Verb::Add)
    }

    pub fn remove(&self) -> Result<&QueryNode<R>, RoninError> {
        self.root(Verb::Remove)
    }

    pub fn count(&self) -> Result<&QueryNode<R>, RoninError> {
        self.root(Verb::Count)
    }

    pub fn create(&self) -> Result<&QueryNode<R>, RoninError> {
        self.root(Verb::Create)
    }

    pub fn alter(&self) -> Result<&QueryNode<R>, RoninError> {
        self.root(Verb::Alter)
    }

    pub fn drop(&self) -> Result<&QueryNode<R>, RoninError> {
        self.root(Verb::Drop)
    }

    /// Field primitive using the configured zero-argument default
    pub fn field(&self, kind: FieldKind) -> QueryNode<()> {
        primitive(kind, self.config.schema.default_value)
    }

    /// Collect the queries built by `operations` without executing them
    pub fn batch<F, I>(&self, operations: F) -> Vec<BatchItem>
    where
        F: FnOnce() -> I,
        I: IntoIterator,
        I::Item: Into<BatchItem>,
    {
        collector::collect(operations)
    }

    /// Fallible form of [`Syntax::batch`]
    pub fn try_batch<F, I, E>(&self, operations: F) -> Result<Vec<BatchItem>, E>
    where
        F: FnOnce() -> Result<I, E>,
        I: IntoIterator,
        I::Item: Into<BatchItem>,
    {
        collector::try_collect(operations)
    }

    /// Collect the queries built by `operations` and hand them to `handler`
    pub fn batch_with<F, I, H, T>(&self, operations: F, handler: H) -> T
    where
        F: FnOnce() -> I,
        I: IntoIterator,
        I::Item: Into<BatchItem>,
        H: FnOnce(Vec<BatchItem>) -> T,
    {
        collector::run_batch(operations, handler)
    }

    pub fn is_batching(&self) -> bool {
        query_node::is_batching()
    }
}

fn build_root<R>(verb: Verb, callback: &TerminalCallback<R>, config: &QueryConfig) -> QueryNode<R> {
    let default_value = Value::from(serde_json::Value::Object(config.default_value.clone()));
    let node = NodeConfig::new()
        .verb(verb)
        .shared_callback(Rc::clone(callback))
        .default_value(default_value);

    let node = if config.passthrough_payloads {
        node.replacer(payload_passthrough())
    } else {
        node
    };
    node.into_root()
}
