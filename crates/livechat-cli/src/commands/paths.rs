use std::path::Path;

use serde_json::{Map, Value, json};

use livechat_core::Collection;
use livechat_infrastructure::{DataStore, LiveChatPaths};

/// Resolved config file, data directory and per-collection file paths.
pub fn describe(store: &DataStore, config: Option<&Path>) -> Value {
    let config_file = match config {
        Some(path) => Value::from(path.display().to_string()),
        None => LiveChatPaths::config_file()
            .map(|path| Value::from(path.display().to_string()))
            .unwrap_or(Value::Null),
    };

    let collections: Map<String, Value> = Collection::ALL
        .into_iter()
        .map(|collection| {
            let path = store.collection_path(collection);
            (
                collection.name().to_string(),
                json!({
                    "path": path.display().to_string(),
                    "exists": path.exists(),
                }),
            )
        })
        .collect();

    json!({
        "configFile": config_file,
        "dataDir": store.data_dir().display().to_string(),
        "collections": collections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_describe_lists_every_collection() {
        let temp_dir = TempDir::new().unwrap();
        let store = DataStore::new(temp_dir.path());
        std::fs::write(store.collection_path(Collection::Chats), "[]").unwrap();

        let config = temp_dir.path().join("config.toml");
        let value = describe(&store, Some(&config));

        assert_eq!(value["configFile"], config.display().to_string());
        assert_eq!(value["dataDir"], temp_dir.path().display().to_string());
        assert_eq!(value["collections"].as_object().unwrap().len(), 8);
        assert_eq!(value["collections"]["chats"]["exists"], true);
        assert_eq!(value["collections"]["analytics"]["exists"], false);
        assert!(
            value["collections"]["canned-responses"]["path"]
                .as_str()
                .unwrap()
                .ends_with("canned-responses.json")
        );
    }
}
