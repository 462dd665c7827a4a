//! JWT token handling
//!
//! This module provides the HS256 token codec, the claim set and the
//! Authorization header helpers.

pub mod claims;
pub mod codec;
pub mod types;
pub mod utils;


pub use claims::ClaimSet;
pub use codec::encode;
pub use types::{Header, Token, TokenPair};
pub use utils::{SCHEME_BEARER, SCHEME_JWT, parse_authorization, peek_claims, peek_subject};
