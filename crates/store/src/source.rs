use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::StoreError;

/// Read-only access to logical record collections.
///
/// A connector returns every document of a collection as raw JSON; schema
/// coercion is the engine's job. Connectors must not cache across calls:
/// each fetch observes the store's current contents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch every document in `collection`.
    async fn fetch(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError>;
}
