use super::DocumentStore;
use crate::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// In-process store used for dry runs and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<BTreeMap<String, Vec<JsonValue>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty collection, as if it had been created externally
    pub async fn create_collection(&self, collection: &str) {
        self.collections
            .lock()
            .await
            .entry(collection.to_string())
            .or_default();
    }

    /// Snapshot of the documents in a collection
    pub async fn documents(&self, collection: &str) -> Vec<JsonValue> {
        self.collections
            .lock()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &str, document: JsonValue) -> Result<()> {
        self.collections
            .lock()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<u64> {
        let collections = self.collections.lock().await;
        Ok(collections.get(collection).map_or(0, |docs| docs.len() as u64))
    }

    async fn collection_names(&self) -> Result<Vec<String>> {
        Ok(self.collections.lock().await.keys().cloned().collect())
    }

    async fn drop_collection(&self, collection: &str) -> Result<()> {
        self.collections.lock().await.remove(collection);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_count_drop() {
        let store = MemoryStore::new();
        assert_eq!(store.count("quizzes").await.unwrap(), 0);

        store.insert("quizzes", json!({"title": "a"})).await.unwrap();
        store.insert("quizzes", json!({"title": "b"})).await.unwrap();
        store.create_collection("simulations").await;

        assert_eq!(store.count("quizzes").await.unwrap(), 2);
        assert_eq!(
            store.collection_names().await.unwrap(),
            vec!["quizzes".to_string(), "simulations".to_string()]
        );

        store.drop_collection("quizzes").await.unwrap();
        assert_eq!(store.count("quizzes").await.unwrap(), 0);
        assert!(store.documents("quizzes").await.is_empty());
    }
}
