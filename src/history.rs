//! Bounded calculation history.
//!
//! The persisted shape is a single JSON array of up to [`MAX_RECORDS`]
//! records under one named key in the host's key-value storage. Eviction is
//! an explicit push-then-trim so the FIFO rule stays visible and testable
//! independent of the storage backend.

use chrono::{SecondsFormat, Utc};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

use crate::error::PersistenceError;
use crate::models::{CalculationData, CalculationRecord};

/// Storage key holding the record array.
pub const HISTORY_KEY: &str = "calculationHistory";

/// Retention cap: the 10 most recently created records.
pub const MAX_RECORDS: usize = 10;

/// Host key-value storage seam. One string document per key.
pub trait HistoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// In-memory storage for tests and ephemeral hosts.
#[derive(Debug, Default)]
pub struct MemoryHistoryStorage {
    cells: Mutex<HashMap<String, String>>,
}

impl HistoryStorage for MemoryHistoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.cells.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.cells.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: one `<key>.json` document per key under a directory.
#[derive(Debug, Clone)]
pub struct FileHistoryStorage {
    dir: PathBuf,
}

impl FileHistoryStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl HistoryStorage for FileHistoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PersistenceError::Storage { key: key.to_string(), source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir)
            .and_then(|_| std::fs::write(self.path_for(key), value))
            .map_err(|source| PersistenceError::Storage { key: key.to_string(), source })
    }
}

/// Append-only log of past calculations with FIFO eviction past the cap.
#[derive(Debug)]
pub struct HistoryStore<S> {
    storage: S,
    key: String,
}

impl<S: HistoryStorage> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, HISTORY_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    /// All retained records, oldest first. An absent key is an empty
    /// history; an unreadable document is an error, not silent data loss.
    pub fn load_records(&self) -> Result<Vec<CalculationRecord>, PersistenceError> {
        match self.storage.read(&self.key)? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| PersistenceError::Corrupt {
                key: self.key.clone(),
                source,
            }),
        }
    }

    /// Append a record, evicting the oldest entries while over the cap,
    /// then persist. On failure the caller's in-memory calculation is
    /// untouched and remains exportable.
    pub fn save_record(&self, record: CalculationRecord) -> Result<(), PersistenceError> {
        let mut records = self.load_records()?;
        records.push(record);
        while records.len() > MAX_RECORDS {
            records.remove(0);
        }
        let encoded = serde_json::to_string(&records).map_err(PersistenceError::Encode)?;
        self.storage.write(&self.key, &encoded)?;
        debug!("History saved - key={}, records={}", self.key, records.len());
        Ok(())
    }
}

/// Identifier for a new record: millisecond timestamp plus a random hex
/// suffix. Unique within a store instance.
pub fn generate_id() -> String {
    format!("calc-{}-{:08x}", Utc::now().timestamp_millis(), rand::random::<u32>())
}

/// Snapshot a finalized calculation into a record stamped with the current
/// UTC time. Clock access lives here and in the CLI, never in the renderers.
pub fn new_record(data: CalculationData) -> CalculationRecord {
    CalculationRecord {
        id: generate_id(),
        date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        data,
    }
}
