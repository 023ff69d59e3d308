//! Error types for the LiveChat record store.

use thiserror::Error;

/// A shared error type for the store and its repositories.
///
/// A missing collection file is never an error; it reads as an empty
/// collection. A file that exists but cannot be parsed surfaces as
/// [`StoreError::Corrupt`] so callers can tell the two apart.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Record not found in a collection
    #[error("Record not found: {collection} '{key}'")]
    NotFound {
        collection: &'static str,
        key: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// A collection file exists but does not hold a valid JSON array of records
    #[error("Corrupt collection '{collection}': {message}")]
    Corrupt { collection: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON"
        message: String,
    },

    /// A partial update could not be merged into a record
    #[error("Invalid patch: {0}")]
    InvalidPatch(String),

    /// Failed to take the collection write lock
    #[error("Lock error: {0}")]
    Lock(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(collection: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            collection,
            key: key.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Corrupt error
    pub fn corrupt(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Corrupt {
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Creates an InvalidPatch error
    pub fn invalid_patch(message: impl Into<String>) -> Self {
        Self::InvalidPatch(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a Corrupt error
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }

    /// Check if this is an InvalidPatch error
    pub fn is_invalid_patch(&self) -> bool {
        matches!(self, Self::InvalidPatch(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, StoreError>`.
pub type Result<T> = std::result::Result<T, StoreError>;
