//! Demo sample data: the agents, chats, articles and figures shown on the
//! product's dashboard screens.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};

use livechat_core::{
    Agent, AgentRole, AgentStatus, Analytics, Article, CannedResponse, Chat, ChatStatus,
    ChatbotFlow, ChatbotNode, Message, NodeType, Record, RecordRepository, SenderType, User,
};
use livechat_infrastructure::DataStore;

/// Seeds every collection and returns `{collection: written count | "skipped"}`.
///
/// Collections that already hold records are skipped unless `force` is set.
/// A corrupt collection aborts the seed instead of being overwritten.
pub async fn run(store: &DataStore, force: bool) -> Result<Value> {
    store.ensure_data_directory()?;
    let now = Utc::now();
    let mut report = Map::new();

    seed_collection(store, agents(now), force, &mut report).await?;
    seed_collection(store, users(now), force, &mut report).await?;
    seed_collection(store, chats(now), force, &mut report).await?;
    seed_collection(store, messages(now), force, &mut report).await?;
    seed_collection(store, articles(now), force, &mut report).await?;
    seed_collection(store, canned_responses(), force, &mut report).await?;
    seed_collection(store, chatbot_flows(now), force, &mut report).await?;
    seed_collection(store, analytics(now), force, &mut report).await?;

    Ok(Value::Object(report))
}

async fn seed_collection<T: Record>(
    store: &DataStore,
    records: Vec<T>,
    force: bool,
    report: &mut Map<String, Value>,
) -> Result<()> {
    let repo = store.repository::<T>();
    let name = T::COLLECTION.name().to_string();

    if !force {
        let existing = repo.try_get_all().await?;
        if !existing.is_empty() {
            tracing::info!(
                collection = %T::COLLECTION,
                existing = existing.len(),
                "Collection already has records, skipping"
            );
            report.insert(name, Value::from("skipped"));
            return Ok(());
        }
    }

    let count = records.len();
    repo.save_all(records).await?;
    tracing::info!(collection = %T::COLLECTION, count, "Seeded collection");
    report.insert(name, Value::from(count));
    Ok(())
}

fn agents(now: DateTime<Utc>) -> Vec<Agent> {
    [
        ("1", "Sarah Johnson", "sarah@example.com", AgentRole::Admin, AgentStatus::Online, 1),
        ("2", "Mike Chen", "mike@example.com", AgentRole::Agent, AgentStatus::Online, 0),
        ("3", "Emily Davis", "emily@example.com", AgentRole::Agent, AgentStatus::Away, 0),
        ("4", "James Wilson", "james@example.com", AgentRole::Agent, AgentStatus::Offline, 0),
    ]
    .into_iter()
    .map(|(id, name, email, role, status, active_chats)| {
        let mut agent = Agent::new(id, name, email);
        agent.role = role;
        agent.status = status;
        agent.active_chats = active_chats;
        agent.created_at = now - Duration::days(90);
        agent
    })
    .collect()
}

fn users(now: DateTime<Utc>) -> Vec<User> {
    [
        ("u1", "John Doe", "john@example.com"),
        ("u2", "Jane Smith", "jane@example.com"),
        ("u3", "Bob Johnson", "bob@example.com"),
    ]
    .into_iter()
    .map(|(id, name, email)| {
        let mut user = User::new(id, name, email);
        user.created_at = now - Duration::days(7);
        user
    })
    .collect()
}

fn chats(now: DateTime<Utc>) -> Vec<Chat> {
    let mut active = Chat::new("1", "u1", "John Doe", "john@example.com");
    active.status = ChatStatus::Active;
    active.agent_id = Some("1".to_string());
    active.agent_name = Some("Sarah Johnson".to_string());
    active.started_at = now - Duration::minutes(10);
    active.tags = vec!["account".to_string()];
    active.unread_count = 2;

    let mut waiting = Chat::new("2", "u2", "Jane Smith", "jane@example.com");
    waiting.started_at = now - Duration::minutes(15);
    waiting.tags = vec!["billing".to_string()];
    waiting.unread_count = 1;

    let mut closed = Chat::new("3", "u3", "Bob Johnson", "bob@example.com");
    closed.status = ChatStatus::Closed;
    closed.agent_id = Some("2".to_string());
    closed.agent_name = Some("Mike Chen".to_string());
    closed.started_at = now - Duration::minutes(90);
    closed.closed_at = Some(now - Duration::minutes(60));
    closed.rating = Some(5);
    closed.feedback = Some("Thank you for your help!".to_string());

    vec![active, waiting, closed]
}

fn messages(now: DateTime<Utc>) -> Vec<Message> {
    [
        ("1", "u1", SenderType::User, "John Doe", "Hi, I need help with my account", 10, true),
        (
            "2",
            "1",
            SenderType::Agent,
            "Sarah Johnson",
            "Hi! I'd be happy to help. What seems to be the issue?",
            8,
            true,
        ),
        ("3", "u1", SenderType::User, "John Doe", "I cannot access my dashboard", 5, false),
    ]
    .into_iter()
    .map(|(id, sender_id, sender_type, sender_name, content, minutes_ago, read)| {
        let mut message = Message::new(id, "1", sender_id, sender_type, sender_name, content);
        message.timestamp = now - Duration::minutes(minutes_ago);
        message.read = read;
        message
    })
    .collect()
}

fn articles(now: DateTime<Utc>) -> Vec<Article> {
    [
        (
            "1",
            "How to Get Started with LiveChat Pro",
            "Learn the basics of setting up and using LiveChat Pro for your business.",
            "getting-started",
            ["beginner", "setup", "tutorial"],
            (1234, 89, 5),
        ),
        (
            "2",
            "Understanding Your Billing Dashboard",
            "A comprehensive guide to managing your subscription and billing information.",
            "billing",
            ["billing", "subscription", "payment"],
            (892, 67, 8),
        ),
        (
            "3",
            "Integrating LiveChat with Your Website",
            "Step-by-step instructions for embedding the chat widget on your site.",
            "technical",
            ["integration", "website", "embed"],
            (2103, 145, 12),
        ),
        (
            "4",
            "Creating Effective Chatbot Flows",
            "Best practices for designing conversational chatbot experiences.",
            "getting-started",
            ["chatbot", "automation", "design"],
            (1567, 98, 7),
        ),
        (
            "5",
            "Advanced Agent Panel Features",
            "Discover powerful features to enhance your agent productivity.",
            "technical",
            ["agent", "productivity", "features"],
            (945, 72, 4),
        ),
        (
            "6",
            "Managing Your Team and Permissions",
            "Learn how to add team members and configure access controls.",
            "getting-started",
            ["team", "permissions", "management"],
            (1189, 81, 6),
        ),
    ]
    .into_iter()
    .map(|(id, title, content, category, tags, (views, helpful, not_helpful))| {
        let mut article = Article::new(id, title, content, category);
        article.tags = tags.iter().map(|t| t.to_string()).collect();
        article.views = views;
        article.helpful = helpful;
        article.not_helpful = not_helpful;
        article.published = true;
        article.created_at = now - Duration::days(30);
        article.updated_at = now - Duration::days(2);
        article
    })
    .collect()
}

fn canned_responses() -> Vec<CannedResponse> {
    [
        (
            "1",
            "Welcome Message",
            "Hello! Thank you for contacting us. How can I help you today?",
            "/welcome",
            "greetings",
        ),
        (
            "2",
            "Check Status",
            "Let me check on that for you. Please give me a moment to look up your information.",
            "/check",
            "common",
        ),
        (
            "3",
            "Technical Support",
            "I understand you're experiencing a technical issue. Let me connect you with our technical support team.",
            "/tech",
            "support",
        ),
    ]
    .into_iter()
    .map(|(id, title, content, shortcut, category)| CannedResponse {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        shortcut: shortcut.to_string(),
        category: category.to_string(),
        agent_id: "1".to_string(),
    })
    .collect()
}

fn chatbot_flows(now: DateTime<Utc>) -> Vec<ChatbotFlow> {
    let mut welcome = ChatbotNode::new(
        "1",
        NodeType::Message,
        "Welcome to our support! How can I help you today?",
    );
    welcome.options = Some(vec![
        "Billing Question".to_string(),
        "Technical Issue".to_string(),
        "General Inquiry".to_string(),
    ]);

    let mut flow = ChatbotFlow::new("1", "Customer Support Flow", "chat_started");
    flow.nodes = vec![welcome];
    flow.active = true;
    flow.created_at = now - Duration::days(14);
    vec![flow]
}

/// One week of daily figures, oldest first, ending yesterday.
fn analytics(now: DateTime<Utc>) -> Vec<Analytics> {
    let today = now.date_naive();
    let week: [(u64, u64, f64); 7] = [
        (120, 98, 2.5),
        (145, 132, 2.1),
        (168, 155, 1.9),
        (152, 140, 2.3),
        (189, 175, 2.0),
        (98, 92, 2.8),
        (87, 80, 3.1),
    ];

    week.into_iter()
        .enumerate()
        .map(|(i, (chats, resolved, avg_time))| {
            let mut entry = Analytics::new(today - Duration::days(7 - i as i64));
            entry.total_chats = chats;
            entry.closed_chats = resolved;
            entry.active_chats = chats - resolved;
            entry.average_rating = 4.8;
            entry.average_response_time = avg_time;
            entry
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use livechat_core::{Collection, MessageRepository};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_seed_writes_every_collection() {
        let temp_dir = TempDir::new().unwrap();
        let store = DataStore::new(temp_dir.path());

        let report = run(&store, false).await.unwrap();

        for collection in Collection::ALL {
            assert!(store.collection_path(collection).exists(), "{collection}");
            assert!(report[collection.name()].is_u64(), "{collection}");
        }
        assert_eq!(report["agents"], 4);
        assert_eq!(store.messages().find_by_chat("1").await.len(), 3);
        assert_eq!(
            store.analytics().get_all().await.last().unwrap().date,
            Utc::now().date_naive() - Duration::days(1)
        );
    }

    #[tokio::test]
    async fn test_seed_skips_populated_collections() {
        let temp_dir = TempDir::new().unwrap();
        let store = DataStore::new(temp_dir.path());
        store
            .users()
            .add(User::new("x", "Existing", "existing@example.com"))
            .await
            .unwrap();

        let report = run(&store, false).await.unwrap();
        assert_eq!(report["users"], "skipped");
        assert_eq!(store.users().get_all().await.len(), 1);

        let report = run(&store, true).await.unwrap();
        assert_eq!(report["users"], 3);
        assert!(store.users().get_by_id("x").await.is_none());
    }

    #[tokio::test]
    async fn test_seed_refuses_corrupt_collection() {
        let temp_dir = TempDir::new().unwrap();
        let store = DataStore::new(temp_dir.path());
        store.ensure_data_directory().unwrap();
        std::fs::write(store.collection_path(Collection::Agents), "oops").unwrap();

        assert!(run(&store, false).await.is_err());
        assert_eq!(
            std::fs::read_to_string(store.collection_path(Collection::Agents)).unwrap(),
            "oops"
        );
    }
}
