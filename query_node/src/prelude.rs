//! Convenience re-exports for common query-node usage

// Engine
pub use crate::node::{NodeConfig, Outcome, QueryItem, QueryNode, QueryOptions, Verb};

// Batching
pub use crate::batch::{is_batching, with_batching, BatchScope};
pub use crate::collector::{collect, run_batch, serialize_queries, try_collect, BatchItem};

// Fields and expressions
pub use crate::expressions::{op, Operator};
pub use crate::fields::FieldProxy;

// Error types
pub use crate::errors::QueryError;

// Wire values
pub use wire_value::{Map, Payload, Token, Value};
