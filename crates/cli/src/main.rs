use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use stockwatch_core::{JobName, JobParams};
use stockwatch_engine::AnalyticsContext;
use stockwatch_store::JsonFileStore;

/// One-shot inventory analytics runner.
///
/// Executes a single named query against the document store and prints the
/// result rows as one JSON array on stdout. Any failure exits non-zero with
/// nothing on stdout.
#[derive(Debug, Parser)]
#[command(name = "stockwatch", version)]
struct Cli {
    /// Job to run: low_stock, top_sellers, inactive_products,
    /// total_movements, recent_alerts or stock_by_category
    job: String,

    /// JSON-encoded parameter object; defaults to {}
    params: Option<String>,

    /// Directory holding the collection exports.
    /// Falls back to STOCKWATCH_DATA_DIR, then ./data
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockwatch_observability::init();

    let cli = Cli::parse();

    let job: JobName = cli.job.parse()?;
    let params: JobParams = match cli.params.as_deref() {
        Some(raw) => serde_json::from_str(raw)
            .context("parameter payload must be a JSON object")?,
        None => JobParams::new(),
    };

    let data_dir = cli.data_dir.unwrap_or_else(|| {
        std::env::var("STOCKWATCH_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"))
    });
    debug!(data_dir = %data_dir.display(), "using collection exports");

    let store = Arc::new(JsonFileStore::new(data_dir));
    let ctx = AnalyticsContext::new(store);

    let rows = stockwatch_jobs::run_job(&ctx, job, &params).await?;

    // One line on stdout, produced only on full success.
    println!("{}", serde_json::to_string(&rows)?);
    Ok(())
}
