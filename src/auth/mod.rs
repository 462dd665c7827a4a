//! Authentication
//!
//! HS256 tokens (`jwt`) and the login sessions built on them (`session`).

pub mod jwt;
pub mod session;

// Re-export commonly used types
pub use jwt::{ClaimSet, Header, Token, TokenPair};
pub use session::{LoginRequest, LoginSession, SessionManager, SessionRegistry, TokenIssuer};
