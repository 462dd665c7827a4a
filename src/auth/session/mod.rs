//! Login sessions
//!
//! Token pair issuance, the concurrent session registry and the refresh flow
//! built on top of them.

pub mod issuer;
pub mod manager;
pub mod record;
pub mod registry;


pub use issuer::{SubjectGenerator, TokenIssuer, format_subject};
pub use manager::{LoginRequest, SessionManager};
pub use record::LoginSession;
pub use registry::SessionRegistry;
