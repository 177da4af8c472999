//! The six analytics queries.
//!
//! Plans use the DataFrame API directly; every query re-reads its
//! collections through the context, so results always reflect the store's
//! current contents.

use chrono::{DateTime, Duration, Utc};
use datafusion::common::JoinType;
use datafusion::functions_aggregate::expr_fn::sum;
use datafusion::prelude::{DataFrame, Expr, col, lit};
use datafusion::scalar::ScalarValue;
use serde_json::Value as JsonValue;

use stockwatch_core::{AnalyticsError, JobParams};
use stockwatch_engine::{AnalyticsContext, Collection, batches_to_rows};

use crate::error::JobError;

/// Products below this quantity count as low stock (strict less-than).
const LOW_STOCK_THRESHOLD: i64 = 10;
/// Maximum number of groups returned by `top_sellers`.
const TOP_SELLERS_LIMIT: usize = 10;
/// A product with no movement in this window counts as inactive.
const INACTIVE_WINDOW_DAYS: i64 = 30;
/// Alerts newer than this window count as recent.
const RECENT_ALERTS_WINDOW_DAYS: i64 = 7;

/// All products with `quantity < 10`. Quantity exactly 10 is excluded.
pub async fn low_stock(ctx: &AnalyticsContext) -> Result<Vec<JsonValue>, JobError> {
    let products = ctx.load(Collection::Products).await?;
    let df = products.filter(col("quantity").lt(lit(LOW_STOCK_THRESHOLD)))?;
    collect(df).await
}

/// Top 10 products by total exit quantity, descending.
///
/// Products with no exit movements are absent (no zero-fill); ties keep the
/// engine's default order.
pub async fn top_sellers(ctx: &AnalyticsContext) -> Result<Vec<JsonValue>, JobError> {
    let movements = ctx.load(Collection::Movements).await?;
    let df = movements
        .filter(col("type").eq(lit("exit")))?
        .aggregate(
            vec![col("product_id")],
            vec![sum(col("quantity")).alias("total_sold")],
        )?
        .sort(vec![col("total_sold").sort(false, false)])?
        .limit(0, Some(TOP_SELLERS_LIMIT))?;
    collect(df).await
}

/// Products with no movement in the last 30 days.
///
/// Anti-join against the distinct product ids of recent movements; the
/// cutoff bound is inclusive, and a product with no movements ever is
/// always included.
pub async fn inactive_products(ctx: &AnalyticsContext) -> Result<Vec<JsonValue>, JobError> {
    let cutoff = ctx.now() - Duration::days(INACTIVE_WINDOW_DAYS);
    let movements = ctx.load(Collection::Movements).await?;
    let products = ctx.load(Collection::Products).await?;

    let active = movements
        .filter(col("date").gt_eq(timestamp_lit(cutoff)))?
        .select(vec![col("product_id")])?
        .distinct()?;

    let df = products.join(
        active,
        JoinType::LeftAnti,
        &["product_id"],
        &["product_id"],
        None,
    )?;
    collect(df).await
}

/// Per-type movement totals for one product: `{type, total}` rows.
///
/// `productId` is required. An absent key fails fast rather than falling
/// back to the engine's "null matches nothing" filter semantics; a product
/// with no movements yields an empty result.
pub async fn total_movements(
    ctx: &AnalyticsContext,
    params: &JobParams,
) -> Result<Vec<JsonValue>, JobError> {
    let product_id = params
        .get("productId")
        .ok_or(AnalyticsError::MissingParam("productId"))?
        .as_str()
        .ok_or_else(|| AnalyticsError::invalid_param("productId", "expected a string"))?;

    let movements = ctx.load(Collection::Movements).await?;
    let df = movements
        .filter(col("product_id").eq(lit(product_id)))?
        .aggregate(vec![col("type")], vec![sum(col("quantity")).alias("total")])?;
    collect(df).await
}

/// All alerts dated within the last 7 days, inclusive bound.
pub async fn recent_alerts(ctx: &AnalyticsContext) -> Result<Vec<JsonValue>, JobError> {
    let cutoff = ctx.now() - Duration::days(RECENT_ALERTS_WINDOW_DAYS);
    let alerts = ctx.load(Collection::Alerts).await?;
    let df = alerts.filter(col("date").gt_eq(timestamp_lit(cutoff)))?;
    collect(df).await
}

/// Total stock per category, ordered by category ascending.
pub async fn stock_by_category(ctx: &AnalyticsContext) -> Result<Vec<JsonValue>, JobError> {
    let products = ctx.load(Collection::Products).await?;
    let df = products
        .aggregate(
            vec![col("category")],
            vec![sum(col("quantity")).alias("total_stock")],
        )?
        .sort(vec![col("category").sort(true, true)])?;
    collect(df).await
}

fn timestamp_lit(ts: DateTime<Utc>) -> Expr {
    lit(ScalarValue::TimestampMicrosecond(
        Some(ts.timestamp_micros()),
        None,
    ))
}

async fn collect(df: DataFrame) -> Result<Vec<JsonValue>, JobError> {
    let batches = df.collect().await?;
    Ok(batches_to_rows(&batches)?)
}
