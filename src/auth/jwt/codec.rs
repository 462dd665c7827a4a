//! Token encoding, parsing and signature verification
//!
//! Wire form: `<b64url(header)>.<b64url(claims)>.<hex(HMAC-SHA256)>`, base64
//! without padding, signature computed over the first two segments.

use super::claims::ClaimSet;
use super::types::{Header, Token};
use super::utils::strip_scheme;
use crate::utils::crypto::{create_hmac_signature, verify_hmac_signature};
use crate::utils::error::{JwxError, Result};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Encode `claims` under the fixed header and sign with `secret`
pub fn encode(claims: &ClaimSet, secret: &[u8]) -> Result<String> {
    let header = encode_segment(&Header::default())?;
    let payload = encode_segment(claims)?;
    let signing_input = format!("{}.{}", header, payload);
    let signature = create_hmac_signature(secret, &signing_input)?;

    Ok(format!("{}.{}", signing_input, signature))
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Base64url + JSON decode of a single segment; every failure is `TokenNotValid`
pub(crate) fn decode_segment<T: DeserializeOwned>(segment: &str, what: &str) -> Result<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|e| JwxError::not_valid(format!("{} is not base64url: {}", what, e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| JwxError::not_valid(format!("{} is not valid JSON: {}", what, e)))
}

/// Split a raw token into exactly three segments
pub(crate) fn split_segments(raw: &str) -> Result<[&str; 3]> {
    let mut parts = raw.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None) => Ok([header, payload, signature]),
        _ => Err(JwxError::not_valid(
            "token must have exactly 3 dot-separated segments",
        )),
    }
}

impl Token {
    /// Sign the current claims and remember the raw form
    pub fn encode(&mut self, secret: &[u8]) -> Result<String> {
        self.raw = encode(&self.claims, secret)?;
        Ok(self.raw.clone())
    }

    /// Parse a raw token, optionally prefixed with `Bearer ` or `JWT `.
    ///
    /// The header must be exactly `alg=HS256, typ=JWT`. The signature is not
    /// checked here; see [`Token::verify`].
    pub fn parse(input: &str) -> Result<Self> {
        let raw = strip_scheme(input)?;
        let [header_b64, payload_b64, _] = split_segments(raw)?;

        let header: Header = decode_segment(header_b64, "header")?;
        if !header.is_supported() {
            return Err(JwxError::not_valid(format!(
                "unsupported header alg={} typ={}",
                header.alg, header.typ
            )));
        }

        let claims: ClaimSet = decode_segment(payload_b64, "payload")?;

        Ok(Self {
            header,
            claims,
            raw: raw.to_string(),
        })
    }

    /// Replace this token's claims and raw form with a parsed token
    pub fn parse_into(&mut self, input: &str) -> Result<()> {
        *self = Self::parse(input)?;
        Ok(())
    }

    /// Recompute the signature of the retained raw form and compare
    pub fn verify(&self, secret: &[u8]) -> Result<()> {
        let [header_b64, payload_b64, signature] = split_segments(&self.raw)?;

        let signing_input = format!("{}.{}", header_b64, payload_b64);
        if !verify_hmac_signature(secret, &signing_input, signature)? {
            warn!("Token signature verification failed");
            return Err(JwxError::not_valid("signature mismatch"));
        }

        debug!("Token signature verified for subject: {:?}", self.subject());
        Ok(())
    }
}
