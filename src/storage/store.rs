//! Record stores
//!
//! A [`RecordStore`] persists one collection as an ordered list of flat
//! records. Collections call `save` with the full list after every mutation;
//! the store decides how that list reaches durable storage.

use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FinTrackError, FinTrackResult};

use super::file_io::{preserve_corrupt_file, read_json, write_json_atomic};

/// Persistence provider for one collection
pub trait RecordStore<T> {
    /// Load every record, in stored order
    fn load(&self) -> FinTrackResult<Vec<T>>;

    /// Replace the stored collection with `records`
    fn save(&self, records: &[T]) -> FinTrackResult<()>;
}

/// Store backed by a JSON file holding a top-level array of records.
///
/// A missing file loads as an empty collection. An unreadable or malformed
/// file also loads as empty, after a warning and a best-effort copy of the
/// bad file next to it. Save failures propagate.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> RecordStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> FinTrackResult<Vec<T>> {
        match read_json::<Vec<T>, _>(&self.path) {
            Ok(records) => {
                tracing::debug!(path = %self.path.display(), count = records.len(), "loaded records");
                Ok(records)
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "could not load records; starting with an empty collection"
                );
                match preserve_corrupt_file(&self.path) {
                    Ok(copy) => {
                        tracing::warn!(copy = %copy.display(), "kept a copy of the unreadable file")
                    }
                    Err(copy_err) => tracing::warn!(error = %copy_err, "could not copy unreadable file"),
                }
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, records: &[T]) -> FinTrackResult<()> {
        write_json_atomic(&self.path, records)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "flushed records");
        Ok(())
    }
}

/// In-memory store.
///
/// Clones share the same backing list, so a test can keep a handle while a
/// collection owns another and observe every flush.
pub struct MemoryStore<T> {
    records: Arc<RwLock<Vec<T>>>,
    saves: Arc<AtomicUsize>,
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            saves: Arc::clone(&self.saves),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::with_records(Vec::new())
    }
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with pre-existing records
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
            saves: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl<T: Clone> MemoryStore<T> {
    /// Copy of the currently stored records
    pub fn snapshot(&self) -> FinTrackResult<Vec<T>> {
        let records = self
            .records
            .read()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(records.clone())
    }
}

impl<T: Clone> RecordStore<T> for MemoryStore<T> {
    fn load(&self) -> FinTrackResult<Vec<T>> {
        self.snapshot()
    }

    fn save(&self, records: &[T]) -> FinTrackResult<()> {
        let mut stored = self
            .records
            .write()
            .map_err(|e| FinTrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *stored = records.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
