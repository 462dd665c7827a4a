//! In-memory login session registry
//!
//! Records are reachable by session key and by subject. Both maps share the
//! same `Arc<LoginSession>` and are only ever changed together, under one lock.

use super::issuer::SubjectGenerator;
use super::record::LoginSession;
use crate::config::SessionConfig;
use crate::utils::time::Clock;
use parking_lot::{Mutex, MutexGuard};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maps guarded by the registry lock
#[derive(Debug, Default)]
pub(crate) struct RegistryState {
    by_key: HashMap<String, Arc<LoginSession>>,
    by_subject: HashMap<String, Arc<LoginSession>>,
}

impl RegistryState {
    pub(crate) fn get(&self, key: &str) -> Option<Arc<LoginSession>> {
        self.by_key.get(key).cloned()
    }

    pub(crate) fn get_by_subject(&self, subject: &str) -> Option<Arc<LoginSession>> {
        self.by_subject.get(subject).cloned()
    }

    /// Register `record` under its key and subject, displacing whatever
    /// previously held either of them
    pub(crate) fn insert(&mut self, record: LoginSession) -> Arc<LoginSession> {
        self.remove_by_key(&record.key);
        if let Some(previous) = self.remove_by_subject(&record.subject) {
            warn!(
                "Subject {} moved from session {} to {}",
                record.subject, previous.key, record.key
            );
        }

        let record = Arc::new(record);
        self.by_key.insert(record.key.clone(), Arc::clone(&record));
        self.by_subject
            .insert(record.subject.clone(), Arc::clone(&record));
        record
    }

    pub(crate) fn remove_by_key(&mut self, key: &str) -> Option<Arc<LoginSession>> {
        let record = self.by_key.remove(key)?;
        self.by_subject.remove(&record.subject);
        Some(record)
    }

    pub(crate) fn remove_by_subject(&mut self, subject: &str) -> Option<Arc<LoginSession>> {
        let record = self.by_subject.remove(subject)?;
        self.by_key.remove(&record.key);
        Some(record)
    }

    /// Drop every record with less than one second left; returns their keys
    pub(crate) fn evict_expired(&mut self, now: i64) -> Vec<String> {
        let expired: Vec<String> = self
            .by_key
            .iter()
            .filter(|(_, record)| record.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_by_key(key);
        }

        if !expired.is_empty() {
            debug!("Evicted {} expired session(s)", expired.len());
        }
        expired
    }

    fn clear(&mut self) {
        self.by_key = HashMap::new();
        self.by_subject = HashMap::new();
    }

    fn is_consistent(&self) -> bool {
        self.by_key.len() == self.by_subject.len()
            && self.by_subject.iter().all(|(subject, record)| {
                record.subject == *subject
                    && self
                        .by_key
                        .get(&record.key)
                        .is_some_and(|primary| Arc::ptr_eq(primary, record))
            })
    }
}

/// Concurrent registry of login sessions
#[derive(Debug)]
pub struct SessionRegistry {
    state: Mutex<RegistryState>,
    subjects: Arc<SubjectGenerator>,
    clock: Arc<dyn Clock>,
    refresh_ttl: i64,
    evict_on_get: bool,
}

impl SessionRegistry {
    pub fn new(config: &SessionConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
            subjects: Arc::new(SubjectGenerator::new(clock.as_ref())),
            clock,
            refresh_ttl: config.refresh_ttl_secs(),
            evict_on_get: config.evict_on_get,
        }
    }

    /// Subject generator shared by every issuer over this registry
    pub fn subjects(&self) -> &Arc<SubjectGenerator> {
        &self.subjects
    }

    pub fn next_subject(&self) -> String {
        self.subjects.next_subject()
    }

    /// Hold the registry lock for a multi-step critical section
    pub(crate) fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock()
    }

    /// Evict expired sessions, stamp the record's expiry and register it
    pub fn add(&self, key: impl Into<String>, mut record: LoginSession) -> Arc<LoginSession> {
        let now = self.clock.now();
        let mut state = self.state.lock();

        state.evict_expired(now);

        record.key = key.into();
        record.expires_at = now.saturating_add(self.refresh_ttl);

        debug!(
            "Adding session {} for subject {}",
            record.key, record.subject
        );
        state.insert(record)
    }

    pub fn get(&self, key: &str) -> Option<Arc<LoginSession>> {
        let mut state = self.state.lock();
        if self.evict_on_get {
            state.evict_expired(self.clock.now());
        }
        state.get(key)
    }

    pub fn get_by_subject(&self, subject: &str) -> Option<Arc<LoginSession>> {
        let mut state = self.state.lock();
        if self.evict_on_get {
            state.evict_expired(self.clock.now());
        }
        state.get_by_subject(subject)
    }

    /// Remove a session from both maps
    pub fn delete_by_key(&self, key: &str) -> Option<Arc<LoginSession>> {
        self.state.lock().remove_by_key(key)
    }

    pub fn delete_by_subject(&self, subject: &str) -> Option<Arc<LoginSession>> {
        self.state.lock().remove_by_subject(subject)
    }

    /// Remove every session with less than one second left; returns how many
    pub fn evict_expired(&self) -> usize {
        let now = self.clock.now();
        self.state.lock().evict_expired(now).len()
    }

    pub fn delete_all(&self) {
        self.state.lock().clear();
        debug!("Removed all sessions");
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.state.lock().by_key.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.state.lock().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Both maps hold the same records: equal sizes, and every subject entry
    /// is the identical record found under its session key
    pub fn is_consistent(&self) -> bool {
        self.state.lock().is_consistent()
    }
}
