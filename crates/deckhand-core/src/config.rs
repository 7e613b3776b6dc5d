//! Startup configuration for the upstream data store
//!
//! Both values are read from the process environment once at startup and
//! carried explicitly from there; nothing in the aggregation path touches
//! the environment.

use thiserror::Error;

/// Environment variable holding the Airtable API key.
pub const API_KEY_VAR: &str = "AIRTABLE_API_KEY";

/// Environment variable holding the base (database) identifier.
pub const BASE_ID_VAR: &str = "AIRTABLE_BASE_ID";

/// Upstream credentials and addressing
#[derive(Debug, Clone)]
pub struct Config {
    /// API key sent as a bearer token on every read
    pub api_key: String,
    /// Identifier of the base holding the four card tables
    pub base_id: String,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> std::result::Result<Self, ConfigError> {
        Ok(Self {
            api_key: require_var(API_KEY_VAR)?,
            base_id: require_var(BASE_ID_VAR)?,
        })
    }
}

fn require_var(name: &'static str) -> std::result::Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

/// Configuration validation error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is unset or empty
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}
