//! Engine bootstrap: one session per process run.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use datafusion::datasource::MemTable;
use datafusion::prelude::{DataFrame, SessionContext};
use tracing::debug;

use stockwatch_store::DocumentStore;

use crate::convert::documents_to_batch;
use crate::error::EngineError;
use crate::schema::Collection;

/// Process-wide analytics context: a DataFusion session plus the document
/// store connector it reads from.
///
/// Constructed once at startup and passed by reference into each query.
/// Loads re-read the store every time, so no collection state survives
/// between invocations. "Now" is captured at construction and used for all
/// cutoff computations within the run.
pub struct AnalyticsContext {
    session: SessionContext,
    store: Arc<dyn DocumentStore>,
    now: DateTime<Utc>,
}

impl AnalyticsContext {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_now(store, Utc::now())
    }

    /// Construct with a pinned clock. Test seam for cutoff-based queries.
    pub fn with_now(store: Arc<dyn DocumentStore>, now: DateTime<Utc>) -> Self {
        Self {
            session: SessionContext::new(),
            store,
            now,
        }
    }

    /// The instant this run considers "current time".
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Fetch a collection from the connector and expose it as a dataframe.
    pub async fn load(&self, collection: Collection) -> Result<DataFrame, EngineError> {
        let documents = self.store.fetch(collection.name()).await?;
        debug!(
            collection = collection.name(),
            documents = documents.len(),
            "loaded collection"
        );

        let schema = collection.schema();
        let batch = documents_to_batch(collection.name(), &schema, &documents)?;
        let table = MemTable::try_new(schema, vec![vec![batch]])?;
        Ok(self.session.read_table(Arc::new(table))?)
    }
}
