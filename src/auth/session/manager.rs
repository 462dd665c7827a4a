//! Session refresh flow
//!
//! Ties the issuer and the registry together: login, access checks with
//! silent access-token renewal, validation and logout.

use super::issuer::TokenIssuer;
use super::record::LoginSession;
use super::registry::SessionRegistry;
use crate::auth::jwt::{SCHEME_JWT, Token, parse_authorization, peek_subject};
use crate::config::SessionConfig;
use crate::utils::error::{JwxError, Result};
use crate::utils::time::{Clock, SystemClock};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Caller data for a new login
#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    /// Claims copied into the refresh token
    pub claims: Map<String, Value>,
    /// Opaque credential reference
    pub credential: String,
    pub app: String,
    pub device_id: String,
    pub url: String,
}

/// Entry point for token sessions
#[derive(Debug)]
pub struct SessionManager {
    registry: Arc<SessionRegistry>,
    issuer: TokenIssuer,
    access_ttl: i64,
    refresh_ttl: i64,
    clock: Arc<dyn Clock>,
}

impl SessionManager {
    /// Manager on the system clock
    pub fn new(config: &SessionConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &SessionConfig, clock: Arc<dyn Clock>) -> Self {
        let registry = Arc::new(SessionRegistry::new(config, Arc::clone(&clock)));
        Self::with_registry(config, registry, clock)
    }

    /// Manager over an existing registry; `clock` should be the registry's clock.
    ///
    /// Subjects come from the registry's generator, so managers sharing a
    /// registry never hand out the same subject.
    pub fn with_registry(
        config: &SessionConfig,
        registry: Arc<SessionRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let issuer =
            TokenIssuer::with_subjects(config, Arc::clone(&clock), Arc::clone(registry.subjects()));
        Self {
            registry,
            issuer,
            access_ttl: config.access_ttl_secs(),
            refresh_ttl: config.refresh_ttl_secs(),
            clock,
        }
    }

    pub fn registry(&self) -> &Arc<SessionRegistry> {
        &self.registry
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Issue a token pair for a successful login and register the session
    pub fn login(
        &self,
        key: impl Into<String>,
        request: LoginRequest,
        secret: &[u8],
    ) -> Result<Arc<LoginSession>> {
        let pair = self.issuer.issue(&request.claims, secret)?;

        let record = LoginSession::new(pair, secret)
            .with_credential(request.credential)
            .with_app(request.app)
            .with_device_id(request.device_id)
            .with_url(request.url);

        let record = self.registry.add(key, record);
        info!("Login session {} started", record.key);
        Ok(record)
    }

    /// Current session for `key`, renewing its access token when it aged out.
    ///
    /// Fails with `SessionNotFound` for unknown keys and with `SessionExpired`
    /// once the refresh token outlived its duration.
    pub fn check_access(&self, key: &str) -> Result<Arc<LoginSession>> {
        let now = self.clock.now();
        let mut state = self.registry.lock();

        let evicted = state.evict_expired(now);

        let Some(record) = state.get(key) else {
            if evicted.iter().any(|k| k == key) {
                return Err(JwxError::session_expired(format!("session {} expired", key)));
            }
            return Err(JwxError::session_not_found(key.to_string()));
        };

        if record.access.age_at(now) <= self.access_ttl {
            return Ok(record);
        }

        if record.refresh.age_at(now) <= self.refresh_ttl {
            let access = self
                .issuer
                .access_token_at(&record.subject, now, record.sign_key())?;

            let mut renewed = LoginSession::clone(&record);
            renewed.access = access;

            debug!("Renewed access token for session {}", key);
            return Ok(state.insert(renewed));
        }

        Err(JwxError::session_expired(format!(
            "refresh token of session {} outlived {}s",
            key, self.refresh_ttl
        )))
    }

    /// Force a new access token while the refresh token is still valid
    pub fn renew_access(&self, key: &str) -> Result<Arc<LoginSession>> {
        let now = self.clock.now();
        let mut state = self.registry.lock();

        let record = state
            .get(key)
            .ok_or_else(|| JwxError::session_not_found(key.to_string()))?;

        if record.refresh.age_at(now) > self.refresh_ttl {
            return Err(JwxError::token_expired(format!(
                "refresh token of session {} outlived {}s",
                key, self.refresh_ttl
            )));
        }

        let mut renewed = LoginSession::clone(&record);
        renewed.access = self
            .issuer
            .access_token_at(&record.subject, now, record.sign_key())?;

        debug!("Renewed access token for session {}", key);
        Ok(state.insert(renewed))
    }

    /// Parse and verify a raw token; returns its claims.
    ///
    /// A token carrying an `exp` claim that has passed is rejected with
    /// `TokenExpired`.
    pub fn validate(&self, raw_token: &str, secret: &[u8]) -> Result<Map<String, Value>> {
        let token = Token::parse(raw_token)?;
        token.verify(secret)?;

        if let Some(exp) = token.claims().expires_at() {
            if self.clock.now() >= exp {
                warn!("Rejected expired token for subject: {:?}", token.subject());
                return Err(JwxError::token_expired(format!("expired at {}", exp)));
            }
        }

        Ok(token.into_claims().into_map())
    }

    /// Validate the token of an Authorization header value
    pub fn authorize(&self, header_value: &str, secret: &[u8]) -> Result<Map<String, Value>> {
        let raw = parse_authorization(header_value)?;
        self.validate(raw, secret)
    }

    /// Refresh token, prefixed with `JWT `, for the session an access token belongs to.
    ///
    /// The access token's subject is read without signature check; only the
    /// registry lookup decides.
    pub fn get_refresh_token(&self, access_token: &str) -> Result<String> {
        let subject = peek_subject(access_token);
        if subject.is_empty() {
            return Err(JwxError::not_valid("access token carries no subject"));
        }

        let record = self
            .registry
            .get_by_subject(&subject)
            .ok_or_else(|| JwxError::session_not_found(subject.clone()))?;

        if record.expires_at <= self.clock.now() {
            return Err(JwxError::token_expired(format!(
                "session of subject {} expired",
                subject
            )));
        }

        Ok(record.refresh.with_scheme(SCHEME_JWT))
    }

    /// End one session
    pub fn logout(&self, key: &str) -> bool {
        let removed = self.registry.delete_by_key(key).is_some();
        if removed {
            info!("Login session {} ended", key);
        }
        removed
    }

    pub fn logout_subject(&self, subject: &str) -> bool {
        self.registry.delete_by_subject(subject).is_some()
    }

    /// End every session, e.g. after rotating secrets
    pub fn logout_all(&self) {
        self.registry.delete_all();
        info!("All login sessions ended");
    }
}
