//! Session lifecycle through the public API

use crate::assert_ok;
use crate::common::{SECRET, T0, login_request, manager_with_ttls, session_key};
use jwx_session::auth::jwt::{Token, peek_subject};
use jwx_session::{JwxError, LoginRequest};

#[test]
fn test_access_renewal_and_expiry() {
    let (manager, clock) = manager_with_ttls(2, 10);
    let key = session_key("pos", "dev-1", "alice");

    let session = assert_ok!(manager.login(key.clone(), login_request("pos", "dev-1", "alice"), SECRET));
    let original = session.access.raw().to_string();

    assert_eq!(assert_ok!(manager.check_access(&key)).access.raw(), original);

    clock.set(T0 + 3);
    let renewed = assert_ok!(manager.check_access(&key));
    assert_ne!(renewed.access.raw(), original);
    assert_eq!(renewed.subject, session.subject);
    assert_eq!(peek_subject(renewed.access.raw()), session.subject);

    clock.set(T0 + 11);
    let err = manager.check_access(&key).unwrap_err();
    assert!(matches!(err, JwxError::SessionExpired(_)));
    assert!(err.is_reauth_required());
    assert!(manager.registry().is_empty());
}

#[test]
fn test_bearer_round_trip_through_authorization_header() {
    let (manager, _clock) = manager_with_ttls(900, 43_200);
    let key = session_key("shop", "browser-9", "bob");
    let session = assert_ok!(manager.login(key, login_request("shop", "browser-9", "bob"), SECRET));

    let header = session.access.with_scheme("Bearer");
    let claims = assert_ok!(manager.authorize(&header, SECRET));
    assert_eq!(claims["sub"], session.subject.as_str());
    assert_eq!(claims.len(), 2);

    // the refresh token handed out for this access token carries the login claims
    let refresh = assert_ok!(manager.get_refresh_token(&header));
    let claims = assert_ok!(manager.authorize(&refresh, SECRET));
    assert_eq!(claims["user"], "bob");
    assert_eq!(claims["profile"]["store"], 17);
    assert_eq!(claims["exp"], T0 + 43_200);
}

#[test]
fn test_tokens_from_other_secret_rejected() {
    let (manager, _clock) = manager_with_ttls(900, 43_200);
    let session = assert_ok!(manager.login("k", LoginRequest::default(), b"first-secret"));

    assert!(matches!(
        manager.authorize(&session.access.with_scheme("JWT"), b"second-secret"),
        Err(JwxError::TokenNotValid(_))
    ));
}

#[test]
fn test_sessions_with_distinct_secrets() {
    let (manager, clock) = manager_with_ttls(2, 10);
    assert_ok!(manager.login("a", LoginRequest::default(), b"secret-a"));
    assert_ok!(manager.login("b", LoginRequest::default(), b"secret-b"));

    // renewals are signed with each session's own secret
    clock.set(T0 + 5);
    let a = assert_ok!(manager.check_access("a"));
    let b = assert_ok!(manager.check_access("b"));

    assert!(Token::parse(a.access.raw()).unwrap().verify(b"secret-a").is_ok());
    assert!(Token::parse(b.access.raw()).unwrap().verify(b"secret-b").is_ok());
    assert!(Token::parse(a.access.raw()).unwrap().verify(b"secret-b").is_err());
}

#[test]
fn test_global_logout() {
    let (manager, _clock) = manager_with_ttls(900, 43_200);
    let mut sessions = Vec::new();
    for user in ["alice", "bob", "carol"] {
        let key = session_key("pos", "dev-1", user);
        sessions.push(assert_ok!(manager.login(key, login_request("pos", "dev-1", user), SECRET)));
    }

    manager.logout_all();

    for session in sessions {
        assert!(matches!(
            manager.check_access(&session.key),
            Err(JwxError::SessionNotFound(_))
        ));
        assert!(matches!(
            manager.get_refresh_token(session.access.raw()),
            Err(JwxError::SessionNotFound(_))
        ));
    }
}
