//! Job dispatch: a closed mapping from job name to query.

use serde_json::Value as JsonValue;
use tracing::info;

use stockwatch_core::{JobName, JobParams};
use stockwatch_engine::AnalyticsContext;

use crate::error::JobError;
use crate::queries;

/// Run one job against the shared context and return its result rows.
///
/// Unknown names never reach this function; they are rejected when parsing
/// into [`JobName`]. Only `total_movements` reads the parameter payload.
pub async fn run_job(
    ctx: &AnalyticsContext,
    job: JobName,
    params: &JobParams,
) -> Result<Vec<JsonValue>, JobError> {
    info!(job = %job, "running analytics job");

    let rows = match job {
        JobName::LowStock => queries::low_stock(ctx).await?,
        JobName::TopSellers => queries::top_sellers(ctx).await?,
        JobName::InactiveProducts => queries::inactive_products(ctx).await?,
        JobName::TotalMovements => queries::total_movements(ctx, params).await?,
        JobName::RecentAlerts => queries::recent_alerts(ctx).await?,
        JobName::StockByCategory => queries::stock_by_category(ctx).await?,
    };

    info!(job = %job, rows = rows.len(), "job finished");
    Ok(rows)
}
