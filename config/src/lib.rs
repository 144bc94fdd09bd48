//! # Configuration Management for RONIN syntax
//!
//! This crate provides the configuration structures consumed by the query
//! facade: which verb roots exist, what zero-argument calls write and how
//! binary payloads are serialized.
//!
//! ## Quick Start
//!
//! ### TOML File Configuration
//! ```toml
//! [query]
//! root_verbs = ["get", "set", "add", "remove", "count", "create", "alter", "drop"]
//! passthrough_payloads = true
//!
//! [query.default_value]
//!
//! [schema]
//! default_value = true
//! ```
//!
//! Load configuration:
//! ```rust,ignore
//! use syntax_config::AppConfig;
//!
//! // Load from ronin.toml, or fall back to defaults
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;

#[cfg(test)]
mod tests;

const DEFAULT_CONFIG_PATH: &str = "./ronin.toml";
const CONFIG_PATH_VAR: &str = "RONIN_SYNTAX_CONFIG";

const DEFAULT_ROOT_VERBS: [&str; 8] = [
    "get", "set", "add", "remove", "count", "create", "alter", "drop",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub query: QueryConfig,
    pub schema: SchemaConfig,
}

/// Query root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Verbs that get a root node
    pub root_verbs: Vec<String>,
    /// Object written by zero-argument calls
    pub default_value: serde_json::Map<String, serde_json::Value>,
    /// Keep binary payloads by reference instead of serializing their metadata
    pub passthrough_payloads: bool,
}

/// Schema helper configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Value written by zero-argument calls on field primitives
    pub default_value: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            root_verbs: DEFAULT_ROOT_VERBS.iter().map(|verb| verb.to_string()).collect(),
            default_value: serde_json::Map::new(),
            passthrough_payloads: true,
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            default_value: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the TOML file named in .env, ./ronin.toml or defaults
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(err) if err.not_found() => {}
            Err(err) => return Err(err.into()),
        }

        // Path given through the environment or .env
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::from_file(&config_path)?
        }
        // Config file next to the working directory
        else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)?
        }
        // Nothing configured
        else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Query validations
        if self.query.root_verbs.is_empty() {
            return Err(ConfigError::Invalid(
                "Query root_verbs cannot be empty".to_string(),
            ));
        }
        for (index, verb) in self.query.root_verbs.iter().enumerate() {
            if verb.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "Query root_verbs cannot contain empty names".to_string(),
                ));
            }
            if self.query.root_verbs[..index]
                .iter()
                .any(|earlier| earlier.eq_ignore_ascii_case(verb))
            {
                return Err(ConfigError::Invalid(format!(
                    "Query root_verbs lists `{}` more than once",
                    verb
                )));
            }
        }

        Ok(())
    }
}

impl QueryConfig {
    /// Create a new query configuration
    pub fn new(
        root_verbs: Vec<String>,
        default_value: serde_json::Map<String, serde_json::Value>,
        passthrough_payloads: bool,
    ) -> Self {
        Self {
            root_verbs,
            default_value,
            passthrough_payloads,
        }
    }
}
