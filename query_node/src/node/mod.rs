//! Query nodes
//!
//! This module provides the chainable node that accumulates instruction
//! trees, its configuration and the outcome of terminal calls.

pub mod chain;
pub mod config;
pub mod item;
pub mod outcome;
pub mod verb;



pub use chain::QueryNode;
pub use config::{NodeConfig, TerminalCallback};
pub use item::{QueryItem, QueryOptions};
pub use outcome::Outcome;
pub use verb::Verb;
