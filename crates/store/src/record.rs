use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Ttl;

/// Source of "now" for expiry decisions. Replaceable in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// One persisted value and the instant it stops being readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredRecord {
    pub fn new(value: impl Into<String>, now: DateTime<Utc>, ttl: Ttl) -> Self {
        Self {
            value: value.into(),
            expires_at: now + ttl,
        }
    }

    /// A record is live strictly before its expiry instant.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Key -> record table shared by the store implementations.
///
/// Ordered so the persisted file is stable between writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordMap(BTreeMap<String, StoredRecord>);

impl RecordMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_live(&self, key: &str, now: DateTime<Utc>) -> Option<&str> {
        self.0
            .get(key)
            .filter(|r| r.is_live(now))
            .map(|r| r.value.as_str())
    }

    /// Insert `record`, returning whatever was stored under `key` before.
    pub fn put(&mut self, key: &str, record: StoredRecord) -> Option<StoredRecord> {
        self.0.insert(key.to_string(), record)
    }

    pub fn remove(&mut self, key: &str) -> Option<StoredRecord> {
        self.0.remove(key)
    }

    /// Drop everything that expired at or before `now`. Returns how many went.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.0.len();
        self.0.retain(|_, r| r.is_live(now));
        before - self.0.len()
    }

    /// Copy containing only the records still live at `now`.
    pub fn live(&self, now: DateTime<Utc>) -> RecordMap {
        let mut copy = self.clone();
        copy.purge_expired(now);
        copy
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn record_is_dead_at_its_expiry_instant() {
        let r = StoredRecord::new("x", at(0), Ttl::hours(2));
        assert!(r.is_live(at(1)));
        assert!(!r.is_live(at(2)));
    }

    #[test]
    fn negative_ttl_is_already_expired() {
        let r = StoredRecord::new("", at(5), -Ttl::days(1));
        assert!(!r.is_live(at(5)));
    }

    #[test]
    fn purge_keeps_only_live_records() {
        let mut map = RecordMap::new();
        map.put("a", StoredRecord::new("1", at(0), Ttl::hours(1)));
        map.put("b", StoredRecord::new("2", at(0), Ttl::hours(10)));

        assert_eq!(map.purge_expired(at(3)), 1);
        assert_eq!(map.get_live("b", at(3)), Some("2"));
        assert_eq!(map.get_live("a", at(3)), None);
    }
}
