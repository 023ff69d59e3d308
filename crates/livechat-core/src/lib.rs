//! Domain types for the LiveChat record store.
//!
//! Defines the eight entity types persisted by the store, the [`Record`]
//! trait that ties each one to its collection file, shallow-merge
//! [`Patch`]es, and the repository traits implemented by
//! `livechat-infrastructure`.

pub mod agent;
pub mod analytics;
pub mod article;
pub mod canned_response;
pub mod chat;
pub mod chatbot;
pub mod config;
pub mod error;
pub mod message;
pub mod patch;
pub mod record;
pub mod repository;
pub mod user;

pub use agent::{Agent, AgentRole, AgentStatus};
pub use analytics::Analytics;
pub use article::Article;
pub use canned_response::CannedResponse;
pub use chat::{Chat, ChatStatus};
pub use chatbot::{ChatbotFlow, ChatbotNode, NodeType};
pub use config::StoreConfig;
pub use error::StoreError;
pub use message::{Attachment, Message, SenderType};
pub use patch::Patch;
pub use record::{Collection, Record};
pub use repository::{AnalyticsRepository, MessageRepository, RecordRepository, Upserted};
pub use user::User;
