//! File-backed repository implementations.
//!
//! Wraps [`JsonCollectionStore`] behind the async repository traits. The
//! store does blocking file I/O, so every call runs on tokio's blocking pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;

use livechat_core::error::{Result, StoreError};
use livechat_core::patch::Patch;
use livechat_core::record::Record;
use livechat_core::repository::{
    AnalyticsRepository, MessageRepository, RecordRepository, Upserted,
};
use livechat_core::{Analytics, Message};

use crate::json_collection_store::JsonCollectionStore;

/// Repository for one collection, stored as `{data_dir}/{collection}.json`.
pub struct FileRecordRepository<T> {
    store: Arc<JsonCollectionStore<T>>,
}

impl<T> Clone for FileRecordRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<T: Record> FileRecordRepository<T> {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::from_store(JsonCollectionStore::new(data_dir))
    }

    pub fn from_store(store: JsonCollectionStore<T>) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Path of the backing JSON file.
    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Runs `f` against the store on the blocking pool.
    async fn blocking<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&JsonCollectionStore<T>) -> R + Send + 'static,
        R: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(|e| StoreError::internal(format!("Failed to join blocking task: {}", e)))
    }

    /// Like [`Self::blocking`] for the lenient read paths: a join failure is
    /// logged and reads as an empty result.
    async fn blocking_read<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&JsonCollectionStore<T>) -> R + Send + 'static,
        R: Default + Send + 'static,
    {
        match self.blocking(f).await {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(collection = %T::COLLECTION, error = %e, "Read task failed");
                R::default()
            }
        }
    }
}

#[async_trait]
impl<T: Record> RecordRepository<T> for FileRecordRepository<T> {
    async fn get_all(&self) -> Vec<T> {
        self.blocking_read(|store| store.get_all()).await
    }

    async fn try_get_all(&self) -> Result<Vec<T>> {
        self.blocking(|store| store.try_get_all()).await?
    }

    async fn save_all(&self, items: Vec<T>) -> Result<()> {
        self.blocking(move |store| store.save_all(items)).await?
    }

    async fn get_by_id(&self, id: &str) -> Option<T> {
        let id = id.to_string();
        self.blocking_read(move |store| store.get_by_id(&id)).await
    }

    async fn find_where<F>(&self, predicate: F) -> Vec<T>
    where
        F: Fn(&T) -> bool + Send + 'static,
    {
        self.blocking_read(move |store| store.find_where(predicate))
            .await
    }

    async fn add(&self, item: T) -> Result<()> {
        self.blocking(move |store| store.add(item)).await?
    }

    async fn update(&self, id: &str, patch: &Patch) -> Result<bool> {
        let id = id.to_string();
        let patch = patch.clone();
        self.blocking(move |store| store.update(&id, &patch)).await?
    }
}

#[async_trait]
impl MessageRepository for FileRecordRepository<Message> {
    async fn find_by_chat(&self, chat_id: &str) -> Vec<Message> {
        let chat_id = chat_id.to_string();
        self.find_where(move |m: &Message| m.chat_id == chat_id)
            .await
    }
}

#[async_trait]
impl AnalyticsRepository for FileRecordRepository<Analytics> {
    async fn upsert(&self, entry: Analytics) -> Result<Upserted> {
        self.blocking(move |store| store.upsert(entry)).await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livechat_core::{SenderType, User};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_add_and_get_by_id() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRecordRepository::<User>::new(temp_dir.path());

        repo.add(User::new("u1", "John Doe", "john@example.com"))
            .await
            .unwrap();

        let user = repo.get_by_id("u1").await.unwrap();
        assert_eq!(user.email, "john@example.com");
        assert!(repo.get_by_id("u2").await.is_none());
    }

    #[tokio::test]
    async fn test_find_by_chat() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRecordRepository::<Message>::new(temp_dir.path());

        repo.save_all(vec![
            Message::new("1", "c1", "u1", SenderType::User, "John", "Hi"),
            Message::new("2", "c2", "u2", SenderType::User, "Jane", "Hello"),
            Message::new("3", "c1", "a1", SenderType::Agent, "Sarah", "How can I help?"),
        ])
        .await
        .unwrap();

        let ids: Vec<String> = repo
            .find_by_chat("c1")
            .await
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(repo.find_by_chat("c9").await.is_empty());
    }

    #[tokio::test]
    async fn test_try_get_all_reports_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRecordRepository::<User>::new(temp_dir.path());
        std::fs::write(repo.path(), "{}").unwrap();

        assert!(repo.get_all().await.is_empty());
        assert!(repo.try_get_all().await.unwrap_err().is_corrupt());
    }

    #[tokio::test]
    async fn test_update_reports_miss() {
        let temp_dir = TempDir::new().unwrap();
        let repo = FileRecordRepository::<User>::new(temp_dir.path());
        repo.add(User::new("u1", "John Doe", "john@example.com"))
            .await
            .unwrap();

        let patch = Patch::new().set("name", "Johnny");
        assert!(repo.update("u1", &patch).await.unwrap());
        assert!(!repo.update("u2", &patch).await.unwrap());
        assert_eq!(repo.get_by_id("u1").await.unwrap().name, "Johnny");
    }
}
