//! # jwx-session
//!
//! HMAC-SHA256 signed access/refresh tokens with an in-memory, concurrent
//! login session registry.
//!
//! ## Features
//!
//! - **Token codec**: `<b64url(header)>.<b64url(claims)>.<hex(HMAC-SHA256)>`, `Bearer `/`JWT ` prefixes accepted
//! - **Token pairs**: minimal short-lived access tokens, long-lived refresh tokens carrying the caller claims
//! - **Session registry**: lookups by session key and by subject, lazy eviction of expired sessions
//! - **Silent renewal**: aged-out access tokens are replaced while the refresh token is valid
//!
//! ## Quick Start
//!
//! ```rust
//! use jwx_session::{LoginRequest, SessionManager};
//! use jwx_session::config::SessionConfig;
//!
//! let manager = SessionManager::new(&SessionConfig::default());
//! let secret = b"change-this-signing-secret";
//!
//! let session = manager
//!     .login("pos:device-1:alice", LoginRequest::default(), secret)
//!     .unwrap();
//!
//! let claims = manager
//!     .authorize(&session.access.with_scheme("Bearer"), secret)
//!     .unwrap();
//! assert_eq!(claims["sub"], session.subject.as_str());
//!
//! let current = manager.check_access("pos:device-1:alice").unwrap();
//! assert_eq!(current.subject, session.subject);
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod utils;

// Re-export main types
pub use auth::jwt::{ClaimSet, Header, Token, TokenPair};
pub use auth::session::{
    LoginRequest, LoginSession, SessionManager, SessionRegistry, SubjectGenerator, TokenIssuer,
};
pub use config::Config;
pub use utils::error::{JwxError, Result};
pub use utils::time::{Clock, ManualClock, SystemClock};
