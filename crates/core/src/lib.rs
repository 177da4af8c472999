//! `stockwatch-core` — analytics domain building blocks.
//!
//! This crate contains **pure domain** primitives (no engine or storage
//! concerns): job identifiers, parameter payloads, collection wire shapes,
//! and domain errors.

pub mod error;
pub mod job;
pub mod record;

pub use error::{AnalyticsError, AnalyticsResult};
pub use job::{JobName, JobParams};
pub use record::{AlertRecord, MovementKind, MovementRecord, ProductRecord};
