//! Convenience re-exports for common RONIN syntax usage
//!
//! This prelude module re-exports the most commonly used items from the workspace,
//! making it easier to import everything you need with a single use statement.
//!
//! # Example
//!
//! ```rust
//! use ronin_syntax::prelude::*;
//!
//! // Now you have access to the facade, the engine and the schema helpers
//! ```

// Core components
pub use crate::core::Syntax;
pub use crate::errors::RoninError;

// Re-export centralized config
pub use syntax_config::{AppConfig, ConfigError, QueryConfig, SchemaConfig};

// Engine types
pub use query_node::prelude::*;

// Expression helpers
pub use query_node::expressions::{
    abs, concat, expression, json_insert, json_patch, json_replace, json_set, random, sql,
    strftime,
};

// Schema helpers
pub use crate::schema::{
    FieldDefinition, FieldGroup, FieldKind, Index, IndexField, Model, SortOrder, Trigger,
    TriggerAction, TriggerTiming, blob, boolean, date, json, link, number, string,
};

// Wire value helpers
pub use wire_value::{Payload, PayloadKind, payload_passthrough};

// Common external dependencies
pub use chrono::{DateTime, Utc};
pub use serde_json;
