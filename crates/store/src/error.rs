use thiserror::Error;

/// Connector-level failure. Always fatal for the invocation; the runner
/// performs no retries.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The named collection does not exist in the store.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// The collection exists but could not be read.
    #[error("failed to read collection {collection}: {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    /// The collection's contents are not a well-formed document sequence.
    #[error("malformed collection {collection}: {reason}")]
    Malformed { collection: String, reason: String },
}

impl StoreError {
    pub fn malformed(collection: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            collection: collection.into(),
            reason: reason.into(),
        }
    }
}
