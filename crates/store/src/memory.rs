use std::sync::{PoisonError, RwLock};

use crate::record::{Clock, RecordMap, StoredRecord, system_clock};
use crate::{KeyValueStore, StoreError, Ttl};

/// Process-local store. Nothing survives the process.
pub struct MemoryStore {
    records: RwLock<RecordMap>,
    clock: Clock,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            records: RwLock::new(RecordMap::new()),
            clock,
        }
    }

    /// Snapshot of every record, expired ones included.
    pub fn snapshot(&self) -> RecordMap {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let now = (self.clock)();
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get_live(key, now)
            .map(str::to_string)
    }

    fn set(&self, key: &str, value: &str, ttl: Ttl) -> Result<(), StoreError> {
        let record = StoredRecord::new(value, (self.clock)(), ttl);
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .put(key, record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::{Arc, Mutex};

    fn manual_clock(start: DateTime<Utc>) -> (Clock, Arc<Mutex<DateTime<Utc>>>) {
        let now = Arc::new(Mutex::new(start));
        let handle = now.clone();
        (Arc::new(move || *handle.lock().unwrap()), now)
    }

    #[test]
    fn set_then_get_round_trip() {
        let store = MemoryStore::new();
        store.set("firstName", "Ada", Ttl::days(30)).unwrap();
        assert_eq!(store.get("firstName").as_deref(), Some("Ada"));
    }

    #[test]
    fn delete_hides_value_but_keeps_expired_record() {
        let store = MemoryStore::new();
        store.set("city", "Houston", Ttl::days(30)).unwrap();
        store.delete("city").unwrap();

        assert_eq!(store.get("city"), None);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn values_expire_with_the_clock() {
        let start = Utc.with_ymd_and_hms(2025, 11, 30, 12, 0, 0).unwrap();
        let (clock, now) = manual_clock(start);
        let store = MemoryStore::with_clock(clock);

        store.set("phone", "555-123-4567", Ttl::days(30)).unwrap();
        *now.lock().unwrap() = start + Ttl::days(29);
        assert!(store.get("phone").is_some());

        *now.lock().unwrap() = start + Ttl::days(30);
        assert!(store.get("phone").is_none());
    }
}
