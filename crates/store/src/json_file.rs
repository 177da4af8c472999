use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::StoreError;
use crate::source::DocumentStore;

/// Document store backed by per-collection JSON exports.
///
/// Each collection lives at `<root>/<collection>.json` as a single JSON
/// array of documents (the layout produced by a document-store array
/// export). A missing file means the collection does not exist.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn fetch(&self, collection: &str) -> Result<Vec<JsonValue>, StoreError> {
        let path = self.collection_path(collection);

        let raw = match std::fs::read(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::UnknownCollection(collection.to_string()));
            }
            Err(e) => {
                return Err(StoreError::Io {
                    collection: collection.to_string(),
                    source: e,
                });
            }
        };

        let value: JsonValue = serde_json::from_slice(&raw)
            .map_err(|e| StoreError::malformed(collection, e.to_string()))?;

        let docs = match value {
            JsonValue::Array(docs) => docs,
            other => {
                return Err(StoreError::malformed(
                    collection,
                    format!("expected a top-level array, got {}", json_kind(&other)),
                ));
            }
        };

        debug!(collection, documents = docs.len(), path = %path.display(), "read collection export");
        Ok(docs)
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with_file(name: &str, contents: &str) -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(name), contents).unwrap();
        let store = JsonFileStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn reads_array_export() {
        let (_dir, store) = store_with_file(
            "products.json",
            r#"[{"productId": "p-1", "category": "tools", "quantity": 5}]"#,
        );

        let docs = store.fetch("products").await.unwrap();
        assert_eq!(docs, vec![json!({"productId": "p-1", "category": "tools", "quantity": 5})]);
    }

    #[tokio::test]
    async fn missing_file_is_unknown_collection() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let err = store.fetch("alerts").await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownCollection(name) if name == "alerts"));
    }

    #[tokio::test]
    async fn non_array_export_is_malformed() {
        let (_dir, store) = store_with_file("movements.json", r#"{"productId": "p-1"}"#);

        let err = store.fetch("movements").await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }

    #[tokio::test]
    async fn unparsable_export_is_malformed() {
        let (_dir, store) = store_with_file("movements.json", "not json at all");

        let err = store.fetch("movements").await.unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }
}
