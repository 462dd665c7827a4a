//! Claim set carried in the token payload
//!
//! Claims are kept in a `serde_json::Map`, which iterates in sorted key order.
//! That order is what makes encoding deterministic.

use crate::utils::time::now_utc_unix;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Issued-at claim
pub const CLAIM_IAT: &str = "iat";
/// Subject claim
pub const CLAIM_SUB: &str = "sub";
/// Absolute expiry claim
pub const CLAIM_EXP: &str = "exp";

/// Ordered key/value payload of a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimSet(Map<String, Value>);

impl ClaimSet {
    /// Fresh claim set holding only `iat = now`
    pub fn new() -> Self {
        Self::new_at(now_utc_unix())
    }

    /// Fresh claim set holding only `iat`
    pub fn new_at(iat: i64) -> Self {
        let mut claims = Map::new();
        claims.insert(CLAIM_IAT.to_string(), Value::from(iat));
        Self(claims)
    }

    /// Wrap a decoded payload as is
    pub fn from_map(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<Value>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// Integer view of a claim.
    ///
    /// Integers are returned as is, floats are truncated and strings are
    /// parsed as JSON numbers. Anything else is `None`.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok()))
                .or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
            }
            _ => None,
        }
    }

    /// Like [`ClaimSet::get_i64`], with 0 for absent or non-numeric claims
    pub fn as_i64(&self, key: &str) -> i64 {
        self.get_i64(key).unwrap_or(0)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn subject(&self) -> Option<&str> {
        self.get_str(CLAIM_SUB)
    }

    pub fn issued_at(&self) -> i64 {
        self.as_i64(CLAIM_IAT)
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.get_i64(CLAIM_EXP)
    }

    /// Overlay every entry of `other`; keys not in `other` are untouched
    pub fn assign<'a, I>(&mut self, other: I)
    where
        I: IntoIterator<Item = (&'a String, &'a Value)>,
    {
        for (key, value) in other {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Drop every claim and start over with `iat = now`
    pub fn clear(&mut self) {
        self.clear_at(now_utc_unix());
    }

    pub fn clear_at(&mut self, now: i64) {
        *self = Self::new_at(now);
    }

    /// Seconds elapsed since `iat`
    pub fn age(&self) -> i64 {
        self.age_at(now_utc_unix())
    }

    pub fn age_at(&self, now: i64) -> i64 {
        now.saturating_sub(self.issued_at())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl Default for ClaimSet {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ClaimSet> for Map<String, Value> {
    fn from(claims: ClaimSet) -> Self {
        claims.0
    }
}

impl<'a> IntoIterator for &'a ClaimSet {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
