//! Token and session configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Token durations and registry policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Access token duration in seconds
    #[serde(default = "default_access_token_ttl")]
    pub access_token_ttl: u64,
    /// Refresh token (and session) duration in seconds
    #[serde(default = "default_refresh_token_ttl")]
    pub refresh_token_ttl: u64,
    /// Also evict expired sessions on lookups, not only on inserts
    #[serde(default)]
    pub evict_on_get: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_token_ttl: default_access_token_ttl(),
            refresh_token_ttl: default_refresh_token_ttl(),
            evict_on_get: false,
        }
    }
}

impl SessionConfig {
    /// Config with explicit durations in seconds
    pub fn with_ttls(access_token_ttl: u64, refresh_token_ttl: u64) -> Self {
        Self {
            access_token_ttl,
            refresh_token_ttl,
            ..Self::default()
        }
    }

    pub fn access_ttl_secs(&self) -> i64 {
        i64::try_from(self.access_token_ttl).unwrap_or(i64::MAX)
    }

    pub fn refresh_ttl_secs(&self) -> i64 {
        i64::try_from(self.refresh_token_ttl).unwrap_or(i64::MAX)
    }

    /// Merge session configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.access_token_ttl != default_access_token_ttl() {
            self.access_token_ttl = other.access_token_ttl;
        }
        if other.refresh_token_ttl != default_refresh_token_ttl() {
            self.refresh_token_ttl = other.refresh_token_ttl;
        }
        if other.evict_on_get {
            self.evict_on_get = other.evict_on_get;
        }
        self
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.access_token_ttl == 0 {
            return Err("access token duration must be at least 1 second".to_string());
        }

        if self.refresh_token_ttl < self.access_token_ttl {
            return Err(
                "refresh token duration must not be shorter than the access token duration"
                    .to_string(),
            );
        }

        if self.refresh_token_ttl > MAX_REFRESH_TOKEN_TTL {
            return Err(
                "refresh token duration should not exceed 30 days for security reasons"
                    .to_string(),
            );
        }

        Ok(())
    }
}
