//! `stockwatch-jobs` — the six analytics queries and their dispatcher.
//!
//! Every query is an independent, side-effect-free read: it loads the
//! collections it needs through the shared [`AnalyticsContext`], runs a
//! dataframe plan, and returns materialized JSON rows.
//!
//! [`AnalyticsContext`]: stockwatch_engine::AnalyticsContext

pub mod dispatch;
pub mod error;
pub mod queries;

#[cfg(test)]
mod integration_tests;

pub use dispatch::run_job;
pub use error::JobError;
