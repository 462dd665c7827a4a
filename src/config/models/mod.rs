//! Configuration data models
//!
//! This module defines all configuration structures used throughout the crate.

pub mod logging;
pub mod session;

// Re-export all configuration types
pub use logging::*;
pub use session::*;

/// Default access token duration in seconds
pub fn default_access_token_ttl() -> u64 {
    15 * 60 // 15 minutes
}

/// Default refresh token duration in seconds
pub fn default_refresh_token_ttl() -> u64 {
    12 * 60 * 60 // 12 hours
}

/// Upper bound for the refresh token duration in seconds
pub const MAX_REFRESH_TOKEN_TTL: u64 = 86400 * 30;

pub fn default_log_level() -> String {
    "info".to_string()
}
