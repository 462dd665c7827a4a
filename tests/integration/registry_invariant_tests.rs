//! Registry invariants under random operation sequences

use crate::common::{SECRET, T0};
use jwx_session::config::SessionConfig;
use jwx_session::{LoginSession, ManualClock, SessionRegistry, TokenIssuer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Map;
use std::collections::HashSet;

#[test]
fn test_maps_stay_in_sync() {
    let config = SessionConfig::with_ttls(5, 30);
    let clock = ManualClock::shared(T0);
    let registry = SessionRegistry::new(&config, clock.clone());
    let issuer = TokenIssuer::new(&config, clock.clone());
    let mut rng = StdRng::seed_from_u64(0x6a77_7873);

    let keys: Vec<String> = (0..12).map(|i| format!("app:dev-{}:user", i)).collect();
    let mut subjects: HashSet<String> = HashSet::new();

    for _ in 0..2_000 {
        let key = &keys[rng.gen_range(0..keys.len())];
        match rng.gen_range(0..6) {
            0..=2 => {
                let pair = issuer.issue(&Map::new(), SECRET).unwrap();
                let record = registry.add(key.clone(), LoginSession::new(pair, SECRET));
                subjects.insert(record.subject.clone());
            }
            3 => {
                registry.delete_by_key(key);
            }
            4 => {
                registry.evict_expired();
            }
            _ => clock.advance(rng.gen_range(0..8)),
        }

        assert!(registry.is_consistent());
    }

    // every live subject resolves to the record found under that record's key
    for subject in &subjects {
        if let Some(record) = registry.get_by_subject(subject) {
            let by_key = registry.get(&record.key).unwrap();
            assert!(std::sync::Arc::ptr_eq(&record, &by_key));
        }
    }
}
