use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{Value, json};
use uuid::Uuid;

use livechat_core::{
    Agent, Analytics, AnalyticsRepository, Article, CannedResponse, Chat, ChatbotFlow,
    Collection, Message, MessageRepository, Patch, RecordRepository, StoreError, Upserted, User,
};
use livechat_infrastructure::DataStore;

/// Binds `$T` to the record type of `$collection` and evaluates `$body`.
macro_rules! with_record_type {
    ($collection:expr, $T:ident => $body:expr) => {
        match $collection {
            Collection::Chats => {
                type $T = Chat;
                $body
            }
            Collection::Messages => {
                type $T = Message;
                $body
            }
            Collection::Users => {
                type $T = User;
                $body
            }
            Collection::Agents => {
                type $T = Agent;
                $body
            }
            Collection::Articles => {
                type $T = Article;
                $body
            }
            Collection::CannedResponses => {
                type $T = CannedResponse;
                $body
            }
            Collection::ChatbotFlows => {
                type $T = ChatbotFlow;
                $body
            }
            Collection::Analytics => {
                type $T = Analytics;
                $body
            }
        }
    };
}

pub async fn list(store: &DataStore, collection: Collection) -> Result<Value> {
    with_record_type!(collection, R => {
        let records = store.repository::<R>().get_all().await;
        Ok(serde_json::to_value(records)?)
    })
}

pub async fn get(store: &DataStore, collection: Collection, id: &str) -> Result<Value> {
    with_record_type!(collection, R => {
        let record = store
            .repository::<R>()
            .get_by_id(id)
            .await
            .ok_or_else(|| StoreError::not_found(collection.name(), id))?;
        Ok(serde_json::to_value(record)?)
    })
}

/// Adds a record parsed from `json`.
///
/// A missing or empty `id` is replaced by a fresh UUID, and missing creation
/// timestamps are set to now. Analytics entries replace the entry for the
/// same date. Prints the stored record.
pub async fn add(store: &DataStore, collection: Collection, json: &str) -> Result<Value> {
    let mut value: Value = serde_json::from_str(json).context("Record is not valid JSON")?;
    prepare_new_record(collection, &mut value, &Uuid::new_v4().to_string())?;

    with_record_type!(collection, R => {
        let record: R = serde_json::from_value(value)
            .with_context(|| format!("Record does not match the {} schema", collection))?;
        store.repository::<R>().add(record.clone()).await?;
        Ok(serde_json::to_value(record)?)
    })
}

/// Applies a JSON patch. Returns the resulting record, or `None` if no record
/// has the id (the collection is left unchanged).
pub async fn update(
    store: &DataStore,
    collection: Collection,
    id: &str,
    patch: &str,
) -> Result<Option<Value>> {
    let patch = Patch::from_value(serde_json::from_str(patch).context("Patch is not valid JSON")?)?;
    if patch.is_empty() {
        tracing::warn!("Empty patch, nothing to update");
    }

    with_record_type!(collection, R => {
        let repo = store.repository::<R>();
        let changed = repo.update(id, &patch).await?;
        let Some(record) = repo.get_by_id(id).await else {
            tracing::warn!("No {} record with key '{}', nothing updated", collection, id);
            return Ok(None);
        };
        if !changed {
            tracing::info!("{} record '{}' already matches the patch", collection, id);
        }
        Ok(Some(serde_json::to_value(record)?))
    })
}

pub async fn upsert_analytics(store: &DataStore, json: &str) -> Result<Value> {
    let entry: Analytics =
        serde_json::from_str(json).context("Analytics entry does not match the schema")?;
    let date = entry.date;

    let outcome = store.analytics().upsert(entry).await?;
    let outcome = match outcome {
        Upserted::Inserted => "inserted",
        Upserted::Replaced => "replaced",
    };

    Ok(json!({ "date": date, "outcome": outcome }))
}

pub async fn messages(store: &DataStore, chat_id: &str) -> Result<Value> {
    let messages = store.messages().find_by_chat(chat_id).await;
    Ok(serde_json::to_value(messages)?)
}

/// Timestamp fields set to now when a new record omits them.
fn creation_timestamps(collection: Collection) -> &'static [&'static str] {
    match collection {
        Collection::Chats => &["startedAt"],
        Collection::Messages => &["timestamp"],
        Collection::Users | Collection::Agents | Collection::ChatbotFlows => &["createdAt"],
        Collection::Articles => &["createdAt", "updatedAt"],
        Collection::CannedResponses | Collection::Analytics => &[],
    }
}

fn prepare_new_record(collection: Collection, value: &mut Value, fresh_id: &str) -> Result<()> {
    let object = value
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Record must be a JSON object"))?;

    if collection.key_field() == "id" {
        let has_id = object
            .get("id")
            .and_then(Value::as_str)
            .is_some_and(|id| !id.is_empty());
        if !has_id {
            object.insert("id".to_string(), Value::String(fresh_id.to_string()));
        }
    }

    let now = Utc::now().to_rfc3339();
    for field in creation_timestamps(collection) {
        object
            .entry(field.to_string())
            .or_insert_with(|| Value::String(now.clone()));
    }

    Ok(())
}
