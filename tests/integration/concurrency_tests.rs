//! Concurrent issuance and login

use crate::common::{SECRET, login_request, session_key};
use jwx_session::config::SessionConfig;
use jwx_session::{SessionManager, SystemClock};
use serde_json::Map;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

const CALLERS: usize = 50;
const PER_CALLER: usize = 200;

#[test]
fn test_concurrent_issuance_yields_unique_subjects() {
    let manager = Arc::new(SessionManager::with_clock(
        &SessionConfig::default(),
        Arc::new(SystemClock),
    ));

    let handles: Vec<_> = (0..CALLERS)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                (0..PER_CALLER)
                    .map(|_| manager.issuer().issue(&Map::new(), SECRET).unwrap().subject)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let subjects: Vec<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let unique: HashSet<&String> = subjects.iter().collect();

    assert_eq!(subjects.len(), CALLERS * PER_CALLER);
    assert_eq!(unique.len(), CALLERS * PER_CALLER);
}

#[test]
fn test_concurrent_logins_and_checks() {
    let manager = Arc::new(SessionManager::new(&SessionConfig::default()));

    let handles: Vec<_> = (0..CALLERS)
        .map(|caller| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || {
                for i in 0..20 {
                    let user = format!("user-{}-{}", caller, i);
                    let key = session_key("pos", "dev", &user);
                    let session = manager
                        .login(key.clone(), login_request("pos", "dev", &user), SECRET)
                        .unwrap();

                    let current = manager.check_access(&key).unwrap();
                    assert_eq!(current.subject, session.subject);

                    if i % 4 == 0 {
                        assert!(manager.logout(&key));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(manager.registry().len(), CALLERS * 15);
    assert!(manager.registry().is_consistent());
}
