//! Atomic JSON file operations.
//!
//! Provides a thin layer for safe concurrent access to a single JSON file:
//! writes go through a temp file + rename, and read-modify-write cycles hold
//! an exclusive lock on a sibling lock file.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use fs2::FileExt;

/// Errors that can occur during atomic JSON operations.
#[derive(Debug)]
pub enum AtomicJsonError {
    /// File I/O error.
    IoError(std::io::Error),
    /// The file exists but its content is not valid for the target type.
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// JSON serialization error.
    SerializeError(serde_json::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicJsonError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicJsonError::ParseError { path, source } => {
                write!(f, "JSON parse error in {}: {}", path.display(), source)
            }
            AtomicJsonError::SerializeError(e) => write!(f, "JSON serialization error: {}", e),
            AtomicJsonError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicJsonError {}

impl From<std::io::Error> for AtomicJsonError {
    fn from(e: std::io::Error) -> Self {
        AtomicJsonError::IoError(e)
    }
}

/// A handle to a JSON file with atomic writes and locked updates.
///
/// Provides:
/// - **Atomicity**: Writes are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: `update` holds an exclusive lock for the whole cycle
/// - **Durability**: Explicit fsync before rename
///
/// Plain `load` does not lock; a reader always sees either the old or the
/// new file thanks to the rename.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    pretty: bool,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new handle. Output is pretty-printed by default.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            pretty: true,
            _phantom: PhantomData,
        }
    }

    /// Sets whether writes are pretty-printed.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist
    /// - `Err(ParseError)`: File exists but is empty or malformed
    /// - `Err(IoError)`: File could not be read
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        let data: T =
            serde_json::from_str(&content).map_err(|source| AtomicJsonError::ParseError {
                path: self.path.clone(),
                source,
            })?;
        Ok(Some(data))
    }

    /// Saves data to the file atomically.
    ///
    /// Creates the parent directory if needed, then writes a temp file,
    /// fsyncs it and renames it over the target.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json_string = if self.pretty {
            serde_json::to_string_pretty(data)
        } else {
            serde_json::to_string(data)
        }
        .map_err(AtomicJsonError::SerializeError)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Saves data while holding the exclusive file lock.
    pub fn save_locked(&self, data: &T) -> Result<(), AtomicJsonError> {
        let _lock = self.acquire_lock()?;
        self.save(data)
    }

    /// Performs a locked read-modify-write.
    ///
    /// `f` receives the current data (or `default_value` if the file does
    /// not exist) and returns whether it changed anything. The file is only
    /// rewritten when it returns `Ok(true)`. Any error from loading, from
    /// `f`, or from saving aborts the update and leaves the file untouched.
    pub fn update<F, E>(&self, default_value: T, f: F) -> Result<bool, E>
    where
        F: FnOnce(&mut T) -> Result<bool, E>,
        E: From<AtomicJsonError>,
    {
        let _lock = self.acquire_lock()?;

        let mut data = self.load()?.unwrap_or(default_value);

        let changed = f(&mut data)?;
        if changed {
            self.save(&data)?;
        }

        Ok(changed)
    }

    /// Temp file path in the same directory, so the rename stays atomic.
    fn temp_path(&self) -> Result<PathBuf, AtomicJsonError> {
        let (parent, file_name) = self.split_path()?;
        Ok(parent.join(format!(".{}.tmp", file_name)))
    }

    fn lock_path(&self) -> Result<PathBuf, AtomicJsonError> {
        let (parent, file_name) = self.split_path()?;
        Ok(parent.join(format!(".{}.lock", file_name)))
    }

    fn split_path(&self) -> Result<(&Path, String), AtomicJsonError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicJsonError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicJsonError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        Ok((parent, file_name.to_string_lossy().into_owned()))
    }

    fn acquire_lock(&self) -> Result<FileLock, AtomicJsonError> {
        FileLock::acquire(&self.lock_path()?)
    }
}

/// An exclusive advisory lock, released when dropped.
///
/// The lock file itself is left in place: deleting it while another
/// process waits on the same inode would let two writers in at once.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(lock_path: &Path) -> Result<Self, AtomicJsonError> {
        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)?;

        file.lock_exclusive().map_err(|e| {
            AtomicJsonError::LockError(format!(
                "Failed to acquire lock on {}: {}",
                lock_path.display(),
                e
            ))
        })?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
