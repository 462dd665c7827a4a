//! Configuration management
//!
//! This module handles loading, validation, and merging of token and logging configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{JwxError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Environment variable for the access token duration in seconds
pub const ENV_ACCESS_TOKEN_TTL: &str = "JWX_ACCESS_TOKEN_TTL";
/// Environment variable for the refresh token duration in seconds
pub const ENV_REFRESH_TOKEN_TTL: &str = "JWX_REFRESH_TOKEN_TTL";
/// Environment variable enabling eviction on lookups
pub const ENV_EVICT_ON_GET: &str = "JWX_EVICT_ON_GET";
/// Environment variable for the log level
pub const ENV_LOG_LEVEL: &str = "JWX_LOG_LEVEL";
/// Environment variable switching to JSON logs
pub const ENV_LOG_JSON: &str = "JWX_LOG_JSON";

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Token and session configuration
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = std::fs::read_to_string(path)
            .map_err(|e| JwxError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| JwxError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from any variable source, defaults for missing values
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ttl) = parse_var(&lookup, ENV_ACCESS_TOKEN_TTL)? {
            config.session.access_token_ttl = ttl;
        }
        if let Some(ttl) = parse_var(&lookup, ENV_REFRESH_TOKEN_TTL)? {
            config.session.refresh_token_ttl = ttl;
        }
        if let Some(flag) = parse_var(&lookup, ENV_EVICT_ON_GET)? {
            config.session.evict_on_get = flag;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.logging.level = level;
        }
        if let Some(flag) = parse_var(&lookup, ENV_LOG_JSON)? {
            config.logging.json = flag;
        }

        config.validate()?;
        Ok(config)
    }

    /// Get session configuration
    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.session
            .validate()
            .map_err(|e| JwxError::Config(format!("Session config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| JwxError::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.session = self.session.merge(other.session);
        self.logging = self.logging.merge(other.logging);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| JwxError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| JwxError::Config(format!("Invalid value for {}: {}", name, e))),
    }
}
