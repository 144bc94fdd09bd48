//! Error types for the RONIN syntax crate
//!
//! This module contains all error types that can be returned by facade operations.

use query_node::{QueryError, Verb};
use syntax_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoninError {
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Query root not configured: {0}")]
    RootNotConfigured(Verb),
}
