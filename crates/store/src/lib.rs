//! Client-side key/value records with expiry.
//!
//! A record is a string value plus an absolute expiry instant. Reads never
//! return expired records; deleting a key is done by overwriting it with a
//! record that has already expired, the same way a browser drops a cookie.
//!
//! - `MemoryStore`: process-local, used by tests and embedders
//! - `FileStore`  : RON file, rewritten atomically after every mutation

mod errors;
mod file;
mod memory;
mod record;

pub use errors::StoreError;
pub use file::{FileStore, FileStoreBuilder};
pub use memory::MemoryStore;
pub use record::{Clock, RecordMap, StoredRecord, system_clock};

pub use chrono::Duration as Ttl;

/// Minimal key/value contract shared by every backing store.
///
/// Single-threaded callers get last-write-wins semantics; there is no
/// grouping of writes across keys.
pub trait KeyValueStore: Send + Sync {
    /// Live value for `key`, `None` if absent or expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, expiring `ttl` from now.
    fn set(&self, key: &str, value: &str, ttl: Ttl) -> Result<(), StoreError>;

    /// Overwrite `key` with an already expired, empty record.
    fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.set(key, "", -Ttl::days(1))
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str, ttl: Ttl) -> Result<(), StoreError> {
        (**self).set(key, value, ttl)
    }

    fn delete(&self, key: &str) -> Result<(), StoreError> {
        (**self).delete(key)
    }
}
