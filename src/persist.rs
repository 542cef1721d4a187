//! Durable order storage.
//!
//! The order is one string entry in a key-value blob store, the same shape a
//! browser's local storage gives you. [`FileStore`] keeps the entries in a
//! single JSON file; [`MemoryStore`] backs tests and ephemeral sessions.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::model::OrderLine;
use crate::order::OrderEvent;

/// Key the order is stored under.
pub const ORDER_KEY: &str = "bowl-order";


// Opaque string-keyed blob store
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}


#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}


/// Entries kept as a JSON object of strings in one file.
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename, so a crash leaves either the old or the new contents.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source: io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let body = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }

    // A corrupt file is dropped rather than blocking every later write
    fn read_for_update(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_all() {
            Err(StorageError::Corrupt { path, source }) => {
                warn!(path = %path.display(), error = %source, "discarding corrupt storage file");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.read_for_update()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_for_update()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}


/// Saves and restores the order under [`ORDER_KEY`].
pub struct OrderPersistence {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl OrderPersistence {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self::with_key(store, ORDER_KEY)
    }

    pub fn with_key(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    // Serialize the full order under the key
    pub fn save(&mut self, lines: &[OrderLine]) -> Result<(), StorageError> {
        let value = serde_json::to_string(lines)?;
        self.store.set(&self.key, value)?;
        debug!(key = %self.key, len = lines.len(), "order saved");
        Ok(())
    }

    /// Saved order, or an empty one when nothing usable is stored.
    ///
    /// Missing entries, values that are not a list of lines, and empty lists
    /// all mean "no saved order".
    pub fn load(&self) -> Vec<OrderLine> {
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read saved order");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<OrderLine>>(&raw) {
            Ok(lines) => {
                debug!(len = lines.len(), "saved order loaded");
                lines
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding malformed saved order");
                Vec::new()
            }
        }
    }

    // Forget the saved order
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}


/// Persist every snapshot the store publishes until the store goes away.
pub async fn persist_task(mut rx: mpsc::UnboundedReceiver<OrderEvent>, mut persistence: OrderPersistence) {
    while let Some(event) = rx.recv().await {
        match event {
            OrderEvent::Changed(lines) => {
                if let Err(e) = persistence.save(&lines) {
                    warn!(error = %e, "failed to persist order");
                }
            }
            OrderEvent::Cleared => {
                if let Err(e) = persistence.clear() {
                    warn!(error = %e, "failed to clear saved order");
                }
            }
        }
    }
}
