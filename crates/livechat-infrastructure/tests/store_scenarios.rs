//! End-to-end scenarios over a real data directory.

use chrono::NaiveDate;
use livechat_core::{
    Analytics, AnalyticsRepository, Chat, ChatStatus, Collection, Patch, RecordRepository,
    Upserted,
};
use livechat_infrastructure::DataStore;
use tempfile::TempDir;

fn chat(id: &str, name: &str) -> Chat {
    let mut chat = Chat::new(id, format!("user-{id}"), name, format!("{id}@example.com"));
    chat.status = ChatStatus::Active;
    chat.tags = vec!["support".to_string()];
    chat
}

#[tokio::test]
async fn test_chat_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let store = DataStore::new(temp_dir.path());
    let chats = store.chats();

    chats.save_all(Vec::new()).await.unwrap();
    assert!(chats.get_all().await.is_empty());

    let first = chat("1", "John Doe");
    let second = chat("2", "Jane Smith");
    chats.add(first.clone()).await.unwrap();
    chats.add(second.clone()).await.unwrap();

    let all = chats.get_all().await;
    assert_eq!(all, vec![first.clone(), second.clone()]);

    let updated = chats
        .update("1", &Patch::new().set("status", "closed"))
        .await
        .unwrap();
    assert!(updated);

    let closed = chats.get_by_id("1").await.unwrap();
    assert_eq!(closed.status, ChatStatus::Closed);
    assert_eq!(closed.user_name, first.user_name);
    assert_eq!(closed.tags, first.tags);
    assert_eq!(closed.started_at, first.started_at);
    assert_eq!(chats.get_by_id("2").await.unwrap(), second);
}

#[tokio::test]
async fn test_files_are_plain_json_arrays() {
    let temp_dir = TempDir::new().unwrap();
    let store = DataStore::new(temp_dir.path());

    store.chats().add(chat("1", "John Doe")).await.unwrap();

    let raw = std::fs::read_to_string(store.collection_path(Collection::Chats)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records = value.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["userName"], "John Doe");
    assert_eq!(records[0]["status"], "active");
    // Pretty-printed with two-space indentation
    assert!(raw.starts_with("[\n  {"));
}

#[tokio::test]
async fn test_analytics_upsert_by_date() {
    let temp_dir = TempDir::new().unwrap();
    let analytics = DataStore::new(temp_dir.path()).analytics();

    let monday = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();

    let mut entry = Analytics::new(monday);
    entry.total_chats = 120;
    assert_eq!(analytics.upsert(entry).await.unwrap(), Upserted::Inserted);

    let mut entry = Analytics::new(tuesday);
    entry.total_chats = 145;
    assert_eq!(analytics.upsert(entry).await.unwrap(), Upserted::Inserted);

    let mut revised = Analytics::new(monday);
    revised.total_chats = 121;
    revised.closed_chats = 98;
    assert_eq!(
        analytics.upsert(revised.clone()).await.unwrap(),
        Upserted::Replaced
    );

    let entries = analytics.get_all().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], revised);
    assert_eq!(entries[1].date, tuesday);
}

#[tokio::test]
async fn test_corrupt_file_reads_empty_and_is_preserved() {
    let temp_dir = TempDir::new().unwrap();
    let store = DataStore::new(temp_dir.path());
    let path = store.collection_path(Collection::Chats);
    store.ensure_data_directory().unwrap();
    std::fs::write(&path, "[{\"id\":").unwrap();

    let chats = store.chats();
    assert!(chats.get_all().await.is_empty());
    assert!(chats.get_by_id("1").await.is_none());
    assert!(chats.try_get_all().await.unwrap_err().is_corrupt());
    assert!(chats.add(chat("1", "John Doe")).await.is_err());

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{\"id\":");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_updates_are_serialized() {
    let temp_dir = TempDir::new().unwrap();
    let store = DataStore::new(temp_dir.path());
    let chats = store.chats();
    for i in 0..5 {
        chats.add(chat(&i.to_string(), "Visitor")).await.unwrap();
    }

    let mut handles = Vec::new();
    for i in 0..5 {
        let chats = store.chats();
        handles.push(tokio::spawn(async move {
            chats
                .update(&i.to_string(), &Patch::new().set("unreadCount", i + 1))
                .await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().unwrap());
    }

    for (i, chat) in chats.get_all().await.into_iter().enumerate() {
        assert_eq!(chat.unread_count, i as u32 + 1);
    }
}
