use super::DocumentStore;
use crate::models::StoreConfig;
use crate::Result;
use anyhow::Context;
use async_trait::async_trait;
use mongodb::bson::{self, doc, Document};
use mongodb::{Client, Database};
use serde_json::Value as JsonValue;

/// MongoDB-backed document store
pub struct MongoStore {
    client: Client,
    database: Database,
}

impl MongoStore {
    /// Connect to the configured database
    ///
    /// The driver connects lazily, so an unreachable server only surfaces on
    /// the first operation.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let client = Client::with_uri_str(&config.connection_url)
            .await
            .with_context(|| {
                format!("Invalid MongoDB connection string: {}", config.connection_url)
            })?;
        let database = client.database(&config.database);

        tracing::debug!(database = %config.database, "mongodb client created");
        Ok(Self { client, database })
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Close pooled connections
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert(&self, collection: &str, document: JsonValue) -> Result<()> {
        let document: Document =
            bson::to_document(&document).context("Document cannot be stored as BSON")?;
        self.database
            .collection::<Document>(collection)
            .insert_one(document)
            .await
            .with_context(|| format!("Insert into '{}' failed", collection))?;
        Ok(())
    }

    async fn count(&self, collection: &str) -> Result<u64> {
        let count = self
            .database
            .collection::<Document>(collection)
            .count_documents(doc! {})
            .await
            .with_context(|| format!("Count of '{}' failed", collection))?;
        Ok(count)
    }

    async fn collection_names(&self) -> Result<Vec<String>> {
        let names = self
            .database
            .list_collection_names()
            .await
            .context("Failed to list collections")?;
        Ok(names)
    }

    async fn drop_collection(&self, collection: &str) -> Result<()> {
        self.database
            .collection::<Document>(collection)
            .drop()
            .await
            .with_context(|| format!("Drop of '{}' failed", collection))?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mongodb"
    }
}
