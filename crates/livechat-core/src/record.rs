//! Collection identities and the `Record` trait shared by every entity type.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// One of the entity collections persisted by the store.
///
/// Each collection lives in its own JSON file inside the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Chats,
    Messages,
    Users,
    Agents,
    Articles,
    CannedResponses,
    ChatbotFlows,
    Analytics,
}

impl Collection {
    /// All collections, in file listing order.
    pub const ALL: [Collection; 8] = [
        Collection::Chats,
        Collection::Messages,
        Collection::Users,
        Collection::Agents,
        Collection::Articles,
        Collection::CannedResponses,
        Collection::ChatbotFlows,
        Collection::Analytics,
    ];

    /// Stable collection name, also the file stem.
    pub fn name(self) -> &'static str {
        match self {
            Collection::Chats => "chats",
            Collection::Messages => "messages",
            Collection::Users => "users",
            Collection::Agents => "agents",
            Collection::Articles => "articles",
            Collection::CannedResponses => "canned-responses",
            Collection::ChatbotFlows => "chatbot-flows",
            Collection::Analytics => "analytics",
        }
    }

    /// File name of the backing JSON file (e.g. `canned-responses.json`).
    pub fn file_name(self) -> &'static str {
        match self {
            Collection::Chats => "chats.json",
            Collection::Messages => "messages.json",
            Collection::Users => "users.json",
            Collection::Agents => "agents.json",
            Collection::Articles => "articles.json",
            Collection::CannedResponses => "canned-responses.json",
            Collection::ChatbotFlows => "chatbot-flows.json",
            Collection::Analytics => "analytics.json",
        }
    }

    /// JSON field that identifies a record within the collection.
    pub fn key_field(self) -> &'static str {
        match self {
            Collection::Analytics => "date",
            _ => "id",
        }
    }

    /// Whether at most one record per key may be stored. `add` replaces
    /// instead of appending in such collections.
    pub fn has_unique_key(self) -> bool {
        matches!(self, Collection::Analytics)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = StoreError;

    /// Accepts the collection name with either `-` or `_` separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == normalized)
            .ok_or_else(|| StoreError::config(format!("Unknown collection: '{}'", s)))
    }
}

/// A flat record stored in one of the collections.
///
/// Implementors are plain serde structs; the store only needs to know which
/// collection they belong to and how to read their key.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection this record type is persisted in.
    const COLLECTION: Collection;

    /// The record's key (`id` for most entities, `date` for analytics).
    fn key(&self) -> Cow<'_, str>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_match_names() {
        for collection in Collection::ALL {
            assert_eq!(
                collection.file_name(),
                format!("{}.json", collection.name())
            );
        }
    }

    #[test]
    fn test_parse_accepts_underscores() {
        assert_eq!(
            "canned_responses".parse::<Collection>().unwrap(),
            Collection::CannedResponses
        );
        assert_eq!(
            "Chatbot-Flows".parse::<Collection>().unwrap(),
            Collection::ChatbotFlows
        );
        assert!("tickets".parse::<Collection>().is_err());
    }

    #[test]
    fn test_analytics_keyed_by_date() {
        assert_eq!(Collection::Analytics.key_field(), "date");
        assert_eq!(Collection::Chats.key_field(), "id");
        assert!(Collection::Analytics.has_unique_key());
        assert!(!Collection::Messages.has_unique_key());
    }
}
