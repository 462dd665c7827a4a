//! Login session record

use crate::auth::jwt::{Token, TokenPair};

/// One authenticated session: both tokens plus caller bookkeeping
#[derive(Clone)]
pub struct LoginSession {
    /// Session key the record is registered under
    pub key: String,
    /// Opaque credential reference, managed by the caller
    pub credential: String,
    /// Absolute expiry in unix seconds, set when the record is added
    pub expires_at: i64,
    /// Application identifier
    pub app: String,
    /// Stable device/session identifier
    pub device_id: String,
    /// Origin URL
    pub url: String,
    /// Session subject shared by both tokens
    pub subject: String,
    /// Current access token
    pub access: Token,
    /// Current refresh token
    pub refresh: Token,
    sign_key: Vec<u8>,
}

impl std::fmt::Debug for LoginSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginSession")
            .field("key", &self.key)
            .field("expires_at", &self.expires_at)
            .field("app", &self.app)
            .field("device_id", &self.device_id)
            .field("url", &self.url)
            .field("subject", &self.subject)
            .field("access", &self.access)
            .field("refresh", &self.refresh)
            .field("credential", &"[REDACTED]")
            .field("sign_key", &"[REDACTED]")
            .finish()
    }
}

impl LoginSession {
    pub fn new(pair: TokenPair, sign_key: impl Into<Vec<u8>>) -> Self {
        Self {
            key: String::new(),
            credential: String::new(),
            expires_at: 0,
            app: String::new(),
            device_id: String::new(),
            url: String::new(),
            subject: pair.subject,
            access: pair.access,
            refresh: pair.refresh,
            sign_key: sign_key.into(),
        }
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = credential.into();
        self
    }

    pub fn with_app(mut self, app: impl Into<String>) -> Self {
        self.app = app.into();
        self
    }

    pub fn with_device_id(mut self, device_id: impl Into<String>) -> Self {
        self.device_id = device_id.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Secret both tokens of this session are signed with
    pub fn sign_key(&self) -> &[u8] {
        &self.sign_key
    }

    /// Less than one second of lifetime left
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_at.saturating_sub(now) < 1
    }
}
