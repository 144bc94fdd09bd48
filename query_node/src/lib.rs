//! Query Node - chainable construction engine for instruction trees
//!
//! This crate turns chains of `step` and `call` invocations into nested
//! instruction trees, defers execution while a batch is being collected and
//! embeds finished trees as sub-query operands.

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod batch;
pub mod collector;
pub mod embed;
pub mod errors;
pub mod expressions;
pub mod fields;
pub mod node;
pub mod prelude;

pub use batch::{is_batching, with_batching, BatchScope};
pub use collector::{collect, run_batch, serialize_queries, try_collect, BatchItem};
pub use errors::QueryError;
pub use fields::FieldProxy;
pub use node::{NodeConfig, Outcome, QueryItem, QueryNode, QueryOptions, TerminalCallback, Verb};

pub use wire_value;
