pub mod config_service;
pub mod data_store;
pub mod file_record_repository;
pub mod json_collection_store;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::data_store::DataStore;
pub use crate::file_record_repository::FileRecordRepository;
pub use crate::json_collection_store::JsonCollectionStore;
pub use crate::paths::LiveChatPaths;
