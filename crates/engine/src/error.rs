use datafusion::error::DataFusionError;
use thiserror::Error;

use stockwatch_store::StoreError;

/// Engine-level failure: connector, plan execution, or schema coercion.
/// All variants are fatal for the invocation.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("query execution failed: {0}")]
    DataFusion(#[from] DataFusionError),

    /// A document did not fit the collection's schema.
    #[error("malformed record in {collection}.{field}: {reason}")]
    Convert {
        collection: String,
        field: String,
        reason: String,
    },
}

impl EngineError {
    pub fn convert(
        collection: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Convert {
            collection: collection.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}
