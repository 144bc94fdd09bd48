//! Schema helpers
//!
//! This module provides field primitives and the model builder whose output
//! is passed to `create.model(...)` and friends.

pub mod model;
pub mod primitives;

pub use model::{FieldGroup, Index, IndexField, Model, SortOrder, Trigger, TriggerAction, TriggerTiming};
pub use primitives::{
    FieldDefinition, FieldKind, blob, boolean, date, json, link, number, primitive, string,
};
