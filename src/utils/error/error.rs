//! Error handling for token and session operations
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, JwxError>;

/// Main error type for token and session operations
#[derive(Error, Debug)]
pub enum JwxError {
    /// Malformed token, header mismatch or signature mismatch
    #[error("Token is not valid: {0}")]
    TokenNotValid(String),

    /// Token carries an `exp` in the past, or its session is past its absolute expiry
    #[error("Token is expired: {0}")]
    TokenExpired(String),

    /// Refresh token outlived its duration; the caller has to log in again
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// Session key or subject not present in the registry
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Authorization header is not `<JWT|Bearer> <token>`
    #[error("Bad Authorization: {0}")]
    BadAuthorization(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Helper functions for creating specific errors
impl JwxError {
    pub fn not_valid<S: Into<String>>(message: S) -> Self {
        Self::TokenNotValid(message.into())
    }

    pub fn token_expired<S: Into<String>>(message: S) -> Self {
        Self::TokenExpired(message.into())
    }

    pub fn session_expired<S: Into<String>>(message: S) -> Self {
        Self::SessionExpired(message.into())
    }

    pub fn session_not_found<S: Into<String>>(message: S) -> Self {
        Self::SessionNotFound(message.into())
    }

    pub fn bad_authorization<S: Into<String>>(message: S) -> Self {
        Self::BadAuthorization(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn crypto<S: Into<String>>(message: S) -> Self {
        Self::Crypto(message.into())
    }

    /// Stable error code for transport layers
    pub fn error_code(&self) -> &'static str {
        match self {
            JwxError::TokenNotValid(_) => "TOKEN_NOT_VALID",
            JwxError::TokenExpired(_) => "TOKEN_EXPIRED",
            JwxError::SessionExpired(_) => "SESSION_EXPIRED",
            JwxError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            JwxError::BadAuthorization(_) => "BAD_AUTHORIZATION",
            JwxError::Config(_) => "CONFIG_ERROR",
            JwxError::Crypto(_) => "CRYPTO_ERROR",
            JwxError::Serialization(_) => "SERIALIZATION_ERROR",
            JwxError::Yaml(_) => "YAML_ERROR",
            JwxError::Io(_) => "IO_ERROR",
        }
    }

    /// Whether the caller has to restart authentication from scratch
    pub fn is_reauth_required(&self) -> bool {
        matches!(
            self,
            JwxError::TokenExpired(_) | JwxError::SessionExpired(_) | JwxError::SessionNotFound(_)
        )
    }
}
