//! Shared utilities
//!
//! Error types, HMAC helpers, logging setup and clock sources.

pub mod crypto;
pub mod error;
pub mod logging;
pub mod time;
