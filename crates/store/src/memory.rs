use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::StoreError;
use crate::source::DocumentStore;

/// In-memory document store for tests and fixtures.
///
/// Collections are seeded up front; fetches clone the seeded documents, so
/// the store itself stays immutable during a run.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    collections: HashMap<String, Vec<JsonValue>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection, replacing any previous contents under that name.
    pub fn with_collection(
        mut self,
        name: impl Into<String>,
        documents: Vec<JsonValue>,
    ) -> Self {
        self.collections.insert(name.into(), documents);
        self
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn fetch(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        self.collections
            .get(collection)
            .cloned()
            .ok_or_else(|| StoreError::UnknownCollection(collection.to_string()))
    }
}
