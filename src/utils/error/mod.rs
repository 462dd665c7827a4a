//! Error handling utilities
//!
//! This module defines the error taxonomy shared by the token codec and the session store.

pub mod error;

// Re-export commonly used types
pub use error::*;
