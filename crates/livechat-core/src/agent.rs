//! Support agents and their availability.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Collection, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Online,
    Away,
    #[default]
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    #[default]
    Agent,
    Admin,
}

/// A support agent.
///
/// `active_chats` and `max_chats` are plain counters maintained by callers;
/// the store never reconciles them against the chats collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub status: AgentStatus,
    #[serde(default)]
    pub active_chats: u32,
    pub max_chats: u32,
    pub role: AgentRole,
    pub created_at: DateTime<Utc>,
}

impl Agent {
    /// Creates an offline agent with room for five chats.
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar: None,
            status: AgentStatus::Offline,
            active_chats: 0,
            max_chats: 5,
            role: AgentRole::Agent,
            created_at: Utc::now(),
        }
    }

    /// Online and below the chat limit.
    pub fn has_capacity(&self) -> bool {
        self.status == AgentStatus::Online && self.active_chats < self.max_chats
    }
}

impl Record for Agent {
    const COLLECTION: Collection = Collection::Agents;

    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_capacity() {
        let mut agent = Agent::new("1", "Sarah Johnson", "sarah@example.com");
        assert!(!agent.has_capacity());

        agent.status = AgentStatus::Online;
        assert!(agent.has_capacity());

        agent.active_chats = agent.max_chats;
        assert!(!agent.has_capacity());
    }
}
