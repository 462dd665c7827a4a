//! JWT types and data structures

use super::claims::ClaimSet;
use serde::{Deserialize, Serialize};

/// The only signing algorithm the codec supports
pub const ALG_HS256: &str = "HS256";
/// Token type carried in the header
pub const TYP_JWT: &str = "JWT";

/// Fixed token header
///
/// Serializes as `{"alg":"HS256","typ":"JWT"}`. Decoding is strict: unknown
/// fields are rejected and both fields are compared structurally, so the key
/// order of a received header does not matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Header {
    /// Signing algorithm
    pub alg: String,
    /// Token type
    pub typ: String,
}

impl Header {
    /// Whether this is the HS256/JWT header the codec issues
    pub fn is_supported(&self) -> bool {
        self.alg == ALG_HS256 && self.typ == TYP_JWT
    }
}

impl Default for Header {
    fn default() -> Self {
        Self {
            alg: ALG_HS256.to_string(),
            typ: TYP_JWT.to_string(),
        }
    }
}

/// Signed token: fixed header, claim set and its last encoded/parsed raw form
#[derive(Clone, PartialEq)]
pub struct Token {
    pub(super) header: Header,
    pub(super) claims: ClaimSet,
    /// `<header_b64>.<claims_b64>.<signature_hex>`, empty until encoded or parsed
    pub(super) raw: String,
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("header", &self.header)
            .field("claims", &self.claims)
            .field("raw", &"[REDACTED]")
            .finish()
    }
}

impl Token {
    /// Token with fresh claims (`iat = now`)
    pub fn new() -> Self {
        Self::with_claims(ClaimSet::new())
    }

    /// Token with fresh claims issued at `iat`
    pub fn new_at(iat: i64) -> Self {
        Self::with_claims(ClaimSet::new_at(iat))
    }

    pub fn with_claims(claims: ClaimSet) -> Self {
        Self {
            header: Header::default(),
            claims,
            raw: String::new(),
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Mutable claims; the raw form is stale until the next `encode`
    pub fn claims_mut(&mut self) -> &mut ClaimSet {
        &mut self.claims
    }

    pub fn into_claims(self) -> ClaimSet {
        self.claims
    }

    /// Last encoded or parsed raw form
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn subject(&self) -> Option<&str> {
        self.claims.subject()
    }

    /// Seconds since the token was issued
    pub fn age(&self) -> i64 {
        self.claims.age()
    }

    pub fn age_at(&self, now: i64) -> i64 {
        self.claims.age_at(now)
    }

    /// Raw form prefixed with the given scheme, e.g. `Bearer <raw>`
    pub fn with_scheme(&self, scheme: &str) -> String {
        format!("{} {}", scheme, self.raw)
    }
}

impl Default for Token {
    fn default() -> Self {
        Self::new()
    }
}

/// Access/refresh pair produced by the issuer
#[derive(Debug, Clone)]
pub struct TokenPair {
    /// Session subject shared by both tokens
    pub subject: String,
    /// Short-lived token carrying only `iat` and `sub`
    pub access: Token,
    /// Long-lived token carrying the caller claims plus `sub` and `exp`
    pub refresh: Token,
}
