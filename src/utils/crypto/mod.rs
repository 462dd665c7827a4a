//! Cryptographic utilities
//!
//! Token signatures are HMAC-SHA256 digests rendered as lowercase hex.

pub mod hmac;

pub use self::hmac::{constant_time_eq, create_hmac_signature, verify_hmac_signature};
