//! Access/refresh token pair issuance

use crate::auth::jwt::claims::{CLAIM_EXP, CLAIM_IAT, CLAIM_SUB};
use crate::auth::jwt::{ClaimSet, Token, TokenPair};
use crate::config::SessionConfig;
use crate::utils::error::Result;
use crate::utils::time::Clock;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Source of session subjects.
///
/// A strictly increasing counter seeded with the unix time at construction,
/// rendered as `<digits[5..]>.<digits[..5]>` over at least ten digits.
/// Every issuer feeding one registry must share the same generator.
#[derive(Debug)]
pub struct SubjectGenerator {
    counter: AtomicU64,
}

impl SubjectGenerator {
    pub fn new(clock: &dyn Clock) -> Self {
        Self::with_seed(u64::try_from(clock.now()).unwrap_or_default())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            counter: AtomicU64::new(seed),
        }
    }

    /// Next subject; concurrent callers never observe the same counter value
    pub fn next_subject(&self) -> String {
        let value = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format_subject(value)
    }
}

/// Render a counter value as a subject string
pub fn format_subject(value: u64) -> String {
    let digits = format!("{:010}", value);
    format!("{}.{}", &digits[5..], &digits[..5])
}

/// Issues signed token pairs for new login sessions
#[derive(Debug)]
pub struct TokenIssuer {
    subjects: Arc<SubjectGenerator>,
    refresh_ttl: i64,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Issuer with its own subject generator
    pub fn new(config: &SessionConfig, clock: Arc<dyn Clock>) -> Self {
        let subjects = Arc::new(SubjectGenerator::new(clock.as_ref()));
        Self::with_subjects(config, clock, subjects)
    }

    /// Issuer drawing subjects from a shared generator
    pub fn with_subjects(
        config: &SessionConfig,
        clock: Arc<dyn Clock>,
        subjects: Arc<SubjectGenerator>,
    ) -> Self {
        Self {
            subjects,
            refresh_ttl: config.refresh_ttl_secs(),
            clock,
        }
    }

    /// Issue a pair under a freshly generated subject
    pub fn issue(&self, extra_claims: &Map<String, Value>, secret: &[u8]) -> Result<TokenPair> {
        let subject = self.subjects.next_subject();
        self.issue_with_subject(extra_claims, &subject, secret)
    }

    /// Issue a pair under a caller-provided subject.
    ///
    /// The access token carries only `iat` and `sub`. The refresh token carries
    /// the extra claims plus `sub` and `exp`; extra claims never override
    /// `iat`, `sub` or `exp`.
    pub fn issue_with_subject(
        &self,
        extra_claims: &Map<String, Value>,
        subject: &str,
        secret: &[u8],
    ) -> Result<TokenPair> {
        let now = self.clock.now();

        let access = self.access_token_at(subject, now, secret)?;

        let mut claims = ClaimSet::new_at(now);
        claims.assign(extra_claims);
        claims.insert(CLAIM_IAT, now);
        claims.insert(CLAIM_SUB, subject);
        claims.insert(CLAIM_EXP, now.saturating_add(self.refresh_ttl));

        let mut refresh = Token::with_claims(claims);
        refresh.encode(secret)?;

        debug!("Issued token pair for subject: {}", subject);
        Ok(TokenPair {
            subject: subject.to_string(),
            access,
            refresh,
        })
    }

    /// Signed access token for `subject`, issued now
    pub fn access_token(&self, subject: &str, secret: &[u8]) -> Result<Token> {
        self.access_token_at(subject, self.clock.now(), secret)
    }

    pub(crate) fn access_token_at(&self, subject: &str, now: i64, secret: &[u8]) -> Result<Token> {
        let mut access = Token::new_at(now);
        access.claims_mut().insert(CLAIM_SUB, subject);
        access.encode(secret)?;
        Ok(access)
    }

    pub fn next_subject(&self) -> String {
        self.subjects.next_subject()
    }
}
