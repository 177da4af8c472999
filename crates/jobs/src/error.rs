use datafusion::error::DataFusionError;
use thiserror::Error;

use stockwatch_core::AnalyticsError;
use stockwatch_engine::EngineError;

/// Failure of a single job run. Nothing is retried; the caller turns this
/// into a non-zero exit with no stdout payload.
#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Domain(#[from] AnalyticsError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("query execution failed: {0}")]
    DataFusion(#[from] DataFusionError),
}
