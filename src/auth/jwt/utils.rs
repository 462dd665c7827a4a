//! Authorization header helpers and unverified payload peeks

use super::claims::ClaimSet;
use super::types::Token;
use crate::utils::error::{JwxError, Result};

/// `Authorization: Bearer <token>`
pub const SCHEME_BEARER: &str = "Bearer";
/// `Authorization: JWT <token>`
pub const SCHEME_JWT: &str = "JWT";

fn is_known_scheme(scheme: &str) -> bool {
    scheme == SCHEME_BEARER || scheme == SCHEME_JWT
}

/// Extract the token from an Authorization header value.
///
/// The value must be exactly two space-separated parts with a `Bearer` or
/// `JWT` scheme (case-sensitive).
pub fn parse_authorization(header_value: &str) -> Result<&str> {
    let mut parts = header_value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if is_known_scheme(scheme) => Ok(token),
        _ => Err(JwxError::bad_authorization(
            "expected '<Bearer|JWT> <token>'",
        )),
    }
}

/// Drop an optional `Bearer `/`JWT ` prefix.
///
/// A two-part value with any other scheme word is rejected as `TokenNotValid`.
pub(crate) fn strip_scheme(input: &str) -> Result<&str> {
    match input.split_once(' ') {
        Some((scheme, token)) if !token.contains(' ') => {
            if is_known_scheme(scheme) {
                Ok(token)
            } else {
                Err(JwxError::not_valid(format!("unknown scheme '{}'", scheme)))
            }
        }
        _ => Ok(input),
    }
}

/// Decode the claims of a token without checking its signature
pub fn peek_claims(input: &str) -> Result<ClaimSet> {
    Token::parse(input).map(Token::into_claims)
}

/// Subject of a token read without signature check, empty on any failure.
///
/// The result is only fit to look up a session that is verified afterwards.
pub fn peek_subject(input: &str) -> String {
    peek_claims(input)
        .ok()
        .and_then(|claims| claims.subject().map(str::to_string))
        .unwrap_or_default()
}
