//! # Reindexer Repository
//!
//! Write side of the reindexer. Defines the `SearchEngineClient` contract the
//! loaders depend on, its error type, and an OpenSearch implementation that
//! submits batches through the bulk API.

pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use errors::SearchError;
pub use interfaces::SearchEngineClient;
pub use opensearch::{IndexConfig, OpenSearchClient};
