//! Entry point to every collection in one data directory.

use std::path::{Path, PathBuf};

use livechat_core::config::StoreConfig;
use livechat_core::error::{Result, StoreError};
use livechat_core::record::{Collection, Record};
use livechat_core::{
    Agent, Analytics, Article, CannedResponse, Chat, ChatbotFlow, Message, User,
};

use crate::file_record_repository::FileRecordRepository;
use crate::json_collection_store::JsonCollectionStore;
use crate::paths::LiveChatPaths;

/// Handle on a data directory holding one JSON file per collection.
///
/// Repositories are cheap to create; each accessor returns a fresh one
/// bound to this directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    data_dir: PathBuf,
    pretty: bool,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            pretty: true,
        }
    }

    /// Builds a store from config, resolving the data directory with
    /// [`LiveChatPaths::resolve_data_dir`].
    pub fn from_config(explicit_dir: Option<PathBuf>, config: &StoreConfig) -> Result<Self> {
        let data_dir = LiveChatPaths::resolve_data_dir(explicit_dir, config)
            .map_err(|e| StoreError::config(e.to_string()))?;
        tracing::debug!(data_dir = %data_dir.display(), "Resolved data directory");
        Ok(Self::new(data_dir).with_pretty(config.pretty))
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of a collection's JSON file.
    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(collection.file_name())
    }

    /// Creates the data directory if it does not exist yet.
    pub fn ensure_data_directory(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| {
            StoreError::io(format!(
                "Failed to create data directory '{}': {}",
                self.data_dir.display(),
                e
            ))
        })
    }

    /// Repository for any record type.
    pub fn repository<T: Record>(&self) -> FileRecordRepository<T> {
        FileRecordRepository::from_store(
            JsonCollectionStore::new(&self.data_dir).with_pretty(self.pretty),
        )
    }

    pub fn chats(&self) -> FileRecordRepository<Chat> {
        self.repository()
    }

    pub fn messages(&self) -> FileRecordRepository<Message> {
        self.repository()
    }

    pub fn users(&self) -> FileRecordRepository<User> {
        self.repository()
    }

    pub fn agents(&self) -> FileRecordRepository<Agent> {
        self.repository()
    }

    pub fn articles(&self) -> FileRecordRepository<Article> {
        self.repository()
    }

    pub fn canned_responses(&self) -> FileRecordRepository<CannedResponse> {
        self.repository()
    }

    pub fn chatbot_flows(&self) -> FileRecordRepository<ChatbotFlow> {
        self.repository()
    }

    pub fn analytics(&self) -> FileRecordRepository<Analytics> {
        self.repository()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livechat_core::repository::RecordRepository;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_accessors_use_expected_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = DataStore::new(temp_dir.path());

        assert_eq!(
            store.canned_responses().path(),
            temp_dir.path().join("canned-responses.json")
        );
        assert_eq!(
            store.chatbot_flows().path(),
            store.collection_path(Collection::ChatbotFlows)
        );

        store
            .users()
            .add(User::new("u1", "John Doe", "john@example.com"))
            .await
            .unwrap();
        assert!(store.collection_path(Collection::Users).exists());
        assert!(!store.collection_path(Collection::Chats).exists());
    }

    #[test]
    fn test_from_config_prefers_explicit_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = StoreConfig {
            data_dir: Some(PathBuf::from("/somewhere/else")),
            pretty: false,
        };

        let store = DataStore::from_config(Some(temp_dir.path().to_path_buf()), &config).unwrap();
        assert_eq!(store.data_dir(), temp_dir.path());
    }
}
