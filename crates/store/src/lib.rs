//! `stockwatch-store` — read-only document-store connectors.
//!
//! The analytics engine consumes collections through the [`DocumentStore`]
//! trait; connectors fetch fully materialized documents and all filtering
//! and aggregation happens in the engine.

pub mod error;
pub mod json_file;
pub mod memory;
pub mod source;

pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use source::DocumentStore;
