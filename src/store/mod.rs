//! Document store abstraction
//!
//! Importer and pruner talk to the database only through [`DocumentStore`],
//! so they can run against MongoDB or an in-memory store.

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

use crate::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// Collection-oriented document database
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document into a collection, creating the collection if needed
    async fn insert(&self, collection: &str, document: JsonValue) -> Result<()>;

    /// Number of documents in a collection (0 if it does not exist)
    async fn count(&self, collection: &str) -> Result<u64>;

    /// Names of all existing collections
    async fn collection_names(&self) -> Result<Vec<String>>;

    /// Drop a collection and every document in it
    async fn drop_collection(&self, collection: &str) -> Result<()>;

    /// Backend name for display purposes
    fn name(&self) -> &'static str;
}
