//! Test fixtures and factories

use jwx_session::config::SessionConfig;
use jwx_session::{LoginRequest, ManualClock, SessionManager};
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Fixed start time for clock-driven tests
pub const T0: i64 = 1_700_000_000;

/// Signing secret used across the suite
pub const SECRET: &[u8] = b"integration-secret-0123456789abcdef";

/// Manager on a manual clock starting at [`T0`]
pub fn manager_with_ttls(access: u64, refresh: u64) -> (SessionManager, Arc<ManualClock>) {
    let clock = ManualClock::shared(T0);
    let manager = SessionManager::with_clock(&SessionConfig::with_ttls(access, refresh), clock.clone());
    (manager, clock)
}

/// Composite session key the way a POS backend would build it
pub fn session_key(app: &str, device: &str, user: &str) -> String {
    format!("{}:{}:{}", app, device, user)
}

pub fn user_claims(user: &str) -> Map<String, Value> {
    json!({
        "user": user,
        "authorized": true,
        "scopes": ["orders:read", "orders:write"],
        "profile": {"lang": "de", "store": 17},
    })
    .as_object()
    .cloned()
    .unwrap_or_default()
}

pub fn login_request(app: &str, device: &str, user: &str) -> LoginRequest {
    LoginRequest {
        claims: user_claims(user),
        credential: format!("cred-ref:{}", user),
        app: app.to_string(),
        device_id: device.to_string(),
        url: format!("https://{}.example/login", app),
    }
}
