//! Whole-collection JSON store.
//!
//! Each record type lives in one JSON array file inside the data directory
//! (`{data_dir}/{collection}.json`). Every operation loads the full array;
//! mutations rewrite the full array while holding the collection lock.

use std::fs;
use std::path::{Path, PathBuf};

use livechat_core::error::{Result, StoreError};
use livechat_core::patch::Patch;
use livechat_core::record::Record;
use livechat_core::repository::Upserted;

use crate::storage::{AtomicJsonError, AtomicJsonFile};

impl From<AtomicJsonError> for StoreError {
    fn from(err: AtomicJsonError) -> Self {
        match err {
            AtomicJsonError::IoError(e) => StoreError::from(e),
            AtomicJsonError::ParseError { path, source } => {
                let collection = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                StoreError::corrupt(collection, source.to_string())
            }
            AtomicJsonError::SerializeError(e) => StoreError::from(e),
            AtomicJsonError::LockError(message) => StoreError::Lock(message),
        }
    }
}

/// Synchronous store for one collection.
///
/// Reads never lock. `save_all`, `add`, `update` and `upsert` hold an
/// exclusive lock on the collection for their whole read-modify-write cycle,
/// so concurrent writers (threads or processes) cannot lose each other's
/// changes.
pub struct JsonCollectionStore<T> {
    data_dir: PathBuf,
    file: AtomicJsonFile<Vec<T>>,
}

impl<T: Record> JsonCollectionStore<T> {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let file = AtomicJsonFile::new(data_dir.join(T::COLLECTION.file_name()));
        Self { data_dir, file }
    }

    /// Sets whether the collection file is pretty-printed.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.file = self.file.with_pretty(pretty);
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the backing JSON file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Creates the data directory if it does not exist yet.
    pub fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).map_err(|e| {
                StoreError::io(format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ))
            })?;
            tracing::info!(data_dir = %self.data_dir.display(), "Created data directory");
        }
        Ok(())
    }

    /// Loads the collection.
    ///
    /// # Returns
    ///
    /// - `Ok(records)`: file loaded (empty vec if the file does not exist)
    /// - `Err(StoreError::Corrupt)`: file exists but is not a valid array of records
    /// - `Err(StoreError::Io)`: file could not be read
    pub fn try_get_all(&self) -> Result<Vec<T>> {
        self.ensure_data_dir()?;
        let records = self.file.load()?.unwrap_or_default();
        tracing::debug!(
            collection = %T::COLLECTION,
            count = records.len(),
            "Loaded collection"
        );
        Ok(records)
    }

    /// Loads the collection, degrading any failure to an empty vec.
    ///
    /// The failure is logged at error level. Callers that must distinguish
    /// "absent" from "corrupt" should use [`Self::try_get_all`].
    pub fn get_all(&self) -> Vec<T> {
        match self.try_get_all() {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    collection = %T::COLLECTION,
                    path = %self.path().display(),
                    error = %e,
                    "Failed to read collection, treating it as empty"
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the collection file with `records`.
    pub fn save_all(&self, records: Vec<T>) -> Result<()> {
        self.ensure_data_dir()?;
        self.file.save_locked(&records)?;
        tracing::debug!(
            collection = %T::COLLECTION,
            count = records.len(),
            "Saved collection"
        );
        Ok(())
    }

    pub fn get_by_id(&self, id: &str) -> Option<T> {
        self.get_all().into_iter().find(|r| r.key() == id)
    }

    pub fn find_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.get_all().into_iter().filter(|r| predicate(r)).collect()
    }

    /// Appends a record.
    ///
    /// Keys are not checked for uniqueness, except in collections where
    /// [`Collection::has_unique_key`] holds: there `add` behaves like
    /// [`Self::upsert`] and replaces the record with the same key.
    ///
    /// [`Collection::has_unique_key`]: livechat_core::Collection::has_unique_key
    pub fn add(&self, record: T) -> Result<()> {
        if T::COLLECTION.has_unique_key() {
            self.upsert(record)?;
            return Ok(());
        }

        self.ensure_data_dir()?;
        let key = record.key().into_owned();

        self.file.update(Vec::new(), |records| {
            records.push(record);
            Ok::<_, StoreError>(true)
        })?;

        tracing::debug!(collection = %T::COLLECTION, key = %key, "Added record");
        Ok(())
    }

    /// Shallow-merges `patch` into the record whose key is `id`.
    ///
    /// Returns whether the file was rewritten: `Ok(false)` when no record
    /// matches or when the merged record equals the stored one. Only the
    /// first match is updated.
    pub fn update(&self, id: &str, patch: &Patch) -> Result<bool> {
        self.ensure_data_dir()?;
        let mut matched = false;

        let updated = self.file.update(Vec::new(), |records| {
            let Some(record) = records.iter_mut().find(|r| r.key() == id) else {
                return Ok::<_, StoreError>(false);
            };
            matched = true;

            let patched = patch.apply(record)?;
            if serde_json::to_value(&patched)? == serde_json::to_value(&*record)? {
                return Ok(false);
            }
            *record = patched;
            Ok(true)
        })?;

        if updated {
            tracing::debug!(collection = %T::COLLECTION, key = %id, "Updated record");
        } else if matched {
            tracing::debug!(
                collection = %T::COLLECTION,
                key = %id,
                "Update skipped, patch changes nothing"
            );
        } else {
            tracing::debug!(
                collection = %T::COLLECTION,
                key = %id,
                "Update skipped, no matching record"
            );
        }
        Ok(updated)
    }

    /// Replaces the record with the same key in place, or appends it.
    pub fn upsert(&self, record: T) -> Result<Upserted> {
        self.ensure_data_dir()?;
        let key = record.key().into_owned();
        let mut outcome = Upserted::Inserted;

        self.file.update(Vec::new(), |records| {
            match records.iter().position(|r| r.key() == key.as_str()) {
                Some(index) => {
                    records[index] = record;
                    outcome = Upserted::Replaced;
                }
                None => records.push(record),
            }
            Ok::<_, StoreError>(true)
        })?;

        tracing::debug!(
            collection = %T::COLLECTION,
            key = %key,
            outcome = ?outcome,
            "Upserted record"
        );
        Ok(outcome)
    }
}
