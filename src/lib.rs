//! # RONIN syntax
//!
//! Chainable construction of RONIN query and schema instruction trees.
//! Chains of steps and calls are materialized into nested trees that are
//! handed to a terminal callback, or collected in batches for a runner.
//!
//! ## Quick Start
//!
//! ```rust
//! use ronin_syntax::prelude::*;
//!
//! fn main() -> Result<(), RoninError> {
//!     // The callback receives every finished query
//!     let syntax = Syntax::new(|tree, _options| Value::Object(tree).to_json());
//!
//!     let query = syntax
//!         .get()?
//!         .step("account")
//!         .step("with")
//!         .call(Value::object([("handle", "juri")]))
//!         .into_resolved();
//!
//!     assert_eq!(
//!         query,
//!         Some(serde_json::json!({ "get": { "account": { "with": { "handle": "juri" } } } }))
//!     );
//!
//!     // Queries built inside a batch are collected instead of executed
//!     let items = syntax.batch(|| {
//!         vec![
//!             syntax.get().map(|get| get.step("accounts").invoke()).ok(),
//!             syntax.count().map(|count| count.step("teams").invoke()).ok(),
//!         ]
//!     });
//!     assert_eq!(items.len(), 2);
//!
//!     Ok(())
//! }
//! ```

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

pub mod core;
pub mod errors;
pub mod prelude;
pub mod schema;

// Re-export the main public types for convenience
pub use core::Syntax;
pub use errors::RoninError;

// Re-export centralized config
pub use syntax_config::{AppConfig, QueryConfig, SchemaConfig};

// Re-export internal crates
pub use query_node;
pub use wire_value;
