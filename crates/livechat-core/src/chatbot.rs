//! Chatbot flows built in the flow editor.
//!
//! Flows are stored as data only; nothing in this workspace executes them.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Collection, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Message,
    Question,
    Action,
    Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub content: String,
    /// Reply buttons offered to the visitor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl ChatbotNode {
    pub fn new(id: impl Into<String>, node_type: NodeType, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type,
            content: content.into(),
            options: None,
            next_node: None,
            action: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatbotFlow {
    pub id: String,
    pub name: String,
    /// Event or keyword that would start the flow.
    pub trigger: String,
    #[serde(default)]
    pub nodes: Vec<ChatbotNode>,
    #[serde(default)]
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl ChatbotFlow {
    pub fn new(id: impl Into<String>, name: impl Into<String>, trigger: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            trigger: trigger.into(),
            nodes: Vec::new(),
            active: false,
            created_at: Utc::now(),
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&ChatbotNode> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// The first node in the flow, where a conversation would begin.
    pub fn entry_node(&self) -> Option<&ChatbotNode> {
        self.nodes.first()
    }
}

impl Record for ChatbotFlow {
    const COLLECTION: Collection = Collection::ChatbotFlows;

    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_lookup() {
        let mut flow = ChatbotFlow::new("f1", "Customer Support Flow", "chat_started");
        let mut greeting = ChatbotNode::new("1", NodeType::Message, "Welcome!");
        greeting.next_node = Some("2".to_string());
        flow.nodes.push(greeting);
        flow.nodes
            .push(ChatbotNode::new("2", NodeType::Question, "What do you need?"));

        assert_eq!(flow.entry_node().map(|n| n.id.as_str()), Some("1"));
        let next = flow
            .entry_node()
            .and_then(|n| n.next_node.as_deref())
            .and_then(|id| flow.node(id))
            .unwrap();
        assert_eq!(next.node_type, NodeType::Question);
        assert!(flow.node("9").is_none());
    }

    #[test]
    fn test_node_type_serialized_as_type() {
        let node = ChatbotNode::new("1", NodeType::Condition, "has account?");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "condition");
        assert!(value.get("nextNode").is_none());
    }
}
