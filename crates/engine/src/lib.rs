//! `stockwatch-engine` — DataFusion bootstrap for the analytics runner.
//!
//! Bridges the document store and the query layer: fixed Arrow schemas for
//! the three collections, JSON-document to record-batch coercion, and the
//! process-wide [`AnalyticsContext`] that queries load dataframes through.

pub mod convert;
pub mod error;
pub mod schema;
pub mod session;

pub use convert::{batches_to_rows, documents_to_batch};
pub use error::EngineError;
pub use schema::{Collection, wire_name};
pub use session::AnalyticsContext;
