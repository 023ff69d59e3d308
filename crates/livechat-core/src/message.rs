//! Messages exchanged inside a chat.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Collection, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    User,
    Agent,
    Bot,
}

/// A file attached to a message, referenced by URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub name: String,
    /// MIME type.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
    pub url: String,
}

/// A single chat message.
///
/// `chat_id` is expected to reference an existing chat; this is not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub sender_type: SenderType,
    pub sender_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl Message {
    /// Creates an unread message sent now.
    pub fn new(
        id: impl Into<String>,
        chat_id: impl Into<String>,
        sender_id: impl Into<String>,
        sender_type: SenderType,
        sender_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            chat_id: chat_id.into(),
            sender_id: sender_id.into(),
            sender_type,
            sender_name: sender_name.into(),
            content: content.into(),
            timestamp: Utc::now(),
            read: false,
            attachments: None,
        }
    }
}

impl Record for Message {
    const COLLECTION: Collection = Collection::Messages;

    fn key(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attachment_type_field_name() {
        let message: Message = serde_json::from_value(json!({
            "id": "m1",
            "chatId": "1",
            "senderId": "u1",
            "senderType": "user",
            "senderName": "John Doe",
            "content": "Here is the screenshot",
            "timestamp": "2024-01-15T10:30:00Z",
            "read": false,
            "attachments": [{
                "id": "a1",
                "name": "screen.png",
                "type": "image/png",
                "size": 20480,
                "url": "/uploads/screen.png"
            }]
        }))
        .unwrap();

        let attachments = message.attachments.unwrap();
        assert_eq!(attachments[0].mime_type, "image/png");
        assert_eq!(message.sender_type, SenderType::User);
    }
}
