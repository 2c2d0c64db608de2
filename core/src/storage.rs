//! Persistence: an abstract synchronous key-value byte store plus the
//! load/save round-trip for the record collection.
//!
//! The whole collection lives as one JSON blob under [`STORAGE_KEY`].
//! Reads are tolerant: a missing key or malformed blob yields an empty
//! collection, never an error. Writes replace the whole blob in one
//! operation so a crash mid-save cannot leave partial bytes behind.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

use crate::migrate;
use crate::migrate::StoredRecord;
use crate::model::ErrorRecord;

/// The single fixed key the collection is stored under.
pub const STORAGE_KEY: &str = "error-fix-tracker";

/// Synchronous key-value byte store, scoped to the current installation.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<Vec<u8>>;
    fn set(&mut self, key: &str, value: &[u8]);
}

/// File-backed store: one `<key>.json` file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    root: PathBuf,
}

impl FileKvStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        std::fs::read(self.path_for(key)).ok()
    }

    fn set(&mut self, key: &str, value: &[u8]) {
        let path = self.path_for(key);
        if let Err(err) = std::fs::create_dir_all(&self.root) {
            warn!("failed to create store dir {}: {err}", self.root.display());
            return;
        }
        // Whole-blob overwrite; never an incremental append.
        if let Err(err) = std::fs::write(&path, value) {
            warn!("failed to write {}: {err}", path.display());
        }
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemKvStore {
    entries: HashMap<String, Vec<u8>>,
}

impl KvStore for MemKvStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &[u8]) {
        self.entries.insert(key.to_string(), value.to_vec());
    }
}

/// The "no backing medium" environment: reads are empty, writes are no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullKvStore;

impl KvStore for NullKvStore {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&mut self, _key: &str, _value: &[u8]) {}
}

/// Read the full collection. Missing or malformed data yields an empty
/// collection; every decoded element passes through the migration step.
pub fn load(store: &dyn KvStore) -> Vec<ErrorRecord> {
    let Some(bytes) = store.get(STORAGE_KEY) else {
        return Vec::new();
    };
    match serde_json::from_slice::<Vec<StoredRecord>>(&bytes) {
        Ok(stored) => stored.into_iter().map(migrate::upgrade).collect(),
        Err(err) => {
            warn!("malformed collection under key {STORAGE_KEY}, starting empty: {err}");
            Vec::new()
        }
    }
}

/// Overwrite the stored blob with the full collection.
pub fn save(store: &mut dyn KvStore, records: &[ErrorRecord]) {
    match serde_json::to_vec(records) {
        Ok(bytes) => {
            store.set(STORAGE_KEY, &bytes);
            debug!("saved {} records", records.len());
        }
        Err(err) => warn!("failed to serialize {} records: {err}", records.len()),
    }
}
