//! Wire values for instruction trees
//!
//! This crate provides the value model shared by the query engine and the
//! downstream compiler: plain JSON-like data, opaque tokens, binary payloads,
//! plus the path codec and structure mutator that operate on them.

pub mod mutate;
pub mod path;
pub mod payload;
pub mod serialize;
pub mod symbols;
pub mod types;

#[cfg(test)]
mod tests;

pub use mutate::{json_round_trip, mutate, payload_passthrough, serialize, Replacer};
pub use path::{get_property, join, segments, set_property, set_property_segments};
pub use payload::{Payload, PayloadKind};
pub use symbols::{EXPRESSION, FIELD, QUERY};
pub use types::{Map, Token, Value};
