//! Shallow-merge partial updates.
//!
//! A [`Patch`] is a JSON object whose top-level keys overwrite the same keys
//! of a record. Nested objects and arrays are replaced wholesale, never
//! merged. A `null` value clears an optional field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, StoreError};
use crate::record::Record;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Patch(Map<String, Value>);

impl Patch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field to the patch (builder style).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Builds a patch from an arbitrary JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(StoreError::invalid_patch(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `record` with this patch merged over it.
    ///
    /// The key field may appear in the patch only with the record's current
    /// value. The merged object must still deserialize as `T`.
    pub fn apply<T: Record>(&self, record: &T) -> Result<T> {
        let key_field = T::COLLECTION.key_field();
        if let Some(new_key) = self.0.get(key_field) {
            if new_key.as_str() != Some(record.key().as_ref()) {
                return Err(StoreError::invalid_patch(format!(
                    "cannot change '{}' of {} record '{}'",
                    key_field,
                    T::COLLECTION,
                    record.key()
                )));
            }
        }

        let mut value = serde_json::to_value(record)?;
        let object = value.as_object_mut().ok_or_else(|| {
            StoreError::internal(format!("{} record is not a JSON object", T::COLLECTION))
        })?;

        for (field, new_value) in &self.0 {
            object.insert(field.clone(), new_value.clone());
        }

        serde_json::from_value(value).map_err(|e| {
            StoreError::invalid_patch(format!(
                "patched {} record '{}' is invalid: {}",
                T::COLLECTION,
                record.key(),
                e
            ))
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::Analytics;
    use crate::chat::{Chat, ChatStatus};
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample_chat() -> Chat {
        let mut chat = Chat::new("1", "u1", "John Doe", "john@example.com");
        chat.agent_name = Some("Sarah Johnson".to_string());
        chat.tags = vec!["billing".to_string()];
        chat
    }

    #[test]
    fn test_apply_changes_only_patched_field() {
        let chat = sample_chat();
        let patch = Patch::new().set("status", "closed");

        let patched = patch.apply(&chat).unwrap();

        assert_eq!(patched.status, ChatStatus::Closed);
        assert_eq!(patched.user_name, chat.user_name);
        assert_eq!(patched.agent_name, chat.agent_name);
        assert_eq!(patched.tags, chat.tags);
        assert_eq!(patched.started_at, chat.started_at);
    }

    #[test]
    fn test_null_clears_optional_field() {
        let chat = sample_chat();
        let patch = Patch::from_value(json!({ "agentName": null })).unwrap();

        let patched = patch.apply(&chat).unwrap();
        assert_eq!(patched.agent_name, None);
    }

    #[test]
    fn test_rejects_key_change() {
        let chat = sample_chat();
        let err = Patch::new().set("id", "2").apply(&chat).unwrap_err();
        assert!(err.is_invalid_patch());

        // Same key is fine
        assert!(Patch::new().set("id", "1").apply(&chat).is_ok());
    }

    #[test]
    fn test_rejects_type_mismatch() {
        let chat = sample_chat();
        let err = Patch::new()
            .set("unreadCount", "many")
            .apply(&chat)
            .unwrap_err();
        assert!(err.is_invalid_patch());
    }

    #[test]
    fn test_analytics_key_is_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let entry = Analytics::new(date);
        assert!(
            Patch::new()
                .set("date", "2024-03-02")
                .apply(&entry)
                .is_err()
        );
        let patched = Patch::new()
            .set("date", "2024-03-01")
            .set("totalChats", 12)
            .apply(&entry)
            .unwrap();
        assert_eq!(patched.total_chats, 12);
    }

    #[test]
    fn test_from_value_requires_object() {
        assert!(Patch::from_value(json!([1, 2])).is_err());
        assert!(Patch::from_value(json!({})).unwrap().is_empty());
    }
}
