use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tracing::{debug, warn};

use crate::record::{Clock, RecordMap, StoredRecord, system_clock};
use crate::{KeyValueStore, StoreError, Ttl};

/// Builder for `FileStore` (single RON file).
pub struct FileStoreBuilder {
    store_file: Option<PathBuf>,
    clock: Option<Clock>,
}

impl Default for FileStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStoreBuilder {
    pub fn new() -> Self {
        Self {
            store_file: None,
            clock: None,
        }
    }

    pub fn with_store_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.store_file = Some(path.into());
        self
    }

    /// Override the source of "now" (tests).
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<FileStore, StoreError> {
        let file_path = self
            .store_file
            .ok_or(StoreError::Invalid("store file not specified"))?;

        if let Some(dir) = file_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let clock = self.clock.unwrap_or_else(system_clock);
        let mut records = read_records(&file_path)?;
        let dropped = records.purge_expired(clock());
        debug!(
            path = %file_path.display(),
            records = records.len(),
            dropped,
            "store loaded"
        );

        Ok(FileStore {
            file_path,
            records: RwLock::new(records),
            clock,
        })
    }
}

fn read_records(path: &Path) -> Result<RecordMap, StoreError> {
    if !path.exists() {
        return Ok(RecordMap::new());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(RecordMap::new());
    }
    Ok(ron::from_str(&content)?)
}

/// Store backed by a RON file.
///
/// The whole table is kept in memory; every `set`/`delete` rewrites the file
/// via a temp file + rename. Expired records are never written out.
pub struct FileStore {
    file_path: PathBuf,
    records: RwLock<RecordMap>,
    clock: Clock,
}

impl FileStore {
    pub fn builder() -> FileStoreBuilder {
        FileStoreBuilder::new()
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Re-read the file, replacing the in-memory table.
    pub fn reload(&self) -> Result<(), StoreError> {
        let mut fresh = read_records(&self.file_path)?;
        fresh.purge_expired((self.clock)());
        *self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner) = fresh;
        Ok(())
    }

    fn persist(&self) -> Result<(), StoreError> {
        let live = self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .live((self.clock)());

        let pretty = ron::ser::PrettyConfig::default();
        let ron_string = ron::ser::to_string_pretty(&live, pretty)?;

        let tmp = self.file_path.with_extension("tmp");
        fs::write(&tmp, ron_string)?;
        fs::rename(&tmp, &self.file_path)?;
        debug!(path = %self.file_path.display(), records = live.len(), "store persisted");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let now = (self.clock)();
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get_live(key, now)
            .map(str::to_string)
    }

    /// The in-memory table only keeps the write if it reached the file.
    fn set(&self, key: &str, value: &str, ttl: Ttl) -> Result<(), StoreError> {
        let record = StoredRecord::new(value, (self.clock)(), ttl);
        let previous = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .put(key, record);

        self.persist().inspect_err(|err| {
            let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
            match previous {
                Some(old) => {
                    records.put(key, old);
                }
                None => {
                    records.remove(key);
                }
            }
            warn!(key, error = %err, "failed to persist store, write rolled back");
        })
    }
}
