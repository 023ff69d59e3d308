//! Chat conversations between a visitor and (optionally) an agent.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Collection, Record};

/// Lifecycle tag of a chat. Transitions are not enforced by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatStatus {
    #[default]
    Waiting,
    Active,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    pub status: ChatStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    /// Visitor rating, 1-5.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub language: String,
    #[serde(default)]
    pub unread_count: u32,
}

impl Chat {
    /// Creates a waiting chat started now, in English, with no agent.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        user_email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            user_email: user_email.into(),
            agent_id: None,
            agent_name: None,
            status: ChatStatus::Waiting,
            started_at: Utc::now(),
            closed_at: None,
            rating: None,
            feedback: None,
            tags: Vec::new(),
            language: "en".to_string(),
            unread_count: 0,
        }
    }

    /// Waiting or active.
    pub fn is_open(&self) -> bool {
        self.status != ChatStatus::Closed
    }
}

impl Record for Chat {
    const COLLECTION: Collection = Collection::Chats;

    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }
}
