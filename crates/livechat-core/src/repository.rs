//! Repository traits for collection persistence.
//!
//! Reads follow the store's lenient contract: a missing or unreadable
//! collection comes back empty (the failure is logged by the implementation).
//! Use [`RecordRepository::try_get_all`] to see the underlying error.

use async_trait::async_trait;

use crate::analytics::Analytics;
use crate::error::Result;
use crate::message::Message;
use crate::patch::Patch;
use crate::record::Record;

/// Generic whole-collection repository for one record type.
#[async_trait]
pub trait RecordRepository<T: Record>: Send + Sync {
    /// Loads the full collection; empty if the file is missing or corrupt.
    async fn get_all(&self) -> Vec<T>;

    /// Loads the full collection, reporting a corrupt file as an error.
    async fn try_get_all(&self) -> Result<Vec<T>>;

    /// Overwrites the collection with `items`.
    async fn save_all(&self, items: Vec<T>) -> Result<()>;

    /// Linear scan for the record with the given key.
    async fn get_by_id(&self, id: &str) -> Option<T>;

    /// All records matching `predicate`, in stored order.
    async fn find_where<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send + 'static;

    /// Appends `item`. Duplicate keys are not rejected, except in
    /// collections with unique keys (analytics), where the record with the
    /// same key is replaced.
    async fn add(&self, item: T) -> Result<()>;

    /// Shallow-merges `patch` into the record with the given key.
    ///
    /// Returns `Ok(false)` without touching the file when no record matches
    /// or the patch leaves the record unchanged.
    async fn update(&self, id: &str, patch: &Patch) -> Result<bool>;
}

/// Outcome of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    /// No record had the key; the entry was appended.
    Inserted,
    /// A record with the key was replaced in place.
    Replaced,
}

#[async_trait]
pub trait MessageRepository: RecordRepository<Message> {
    /// Messages belonging to a chat, in stored order.
    async fn find_by_chat(&self, chat_id: &str) -> Vec<Message>;
}

#[async_trait]
pub trait AnalyticsRepository: RecordRepository<Analytics> {
    /// Inserts the entry, or replaces the existing entry for the same date.
    async fn upsert(&self, entry: Analytics) -> Result<Upserted>;
}
