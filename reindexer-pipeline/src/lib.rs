//! # Reindexer Pipeline
//!
//! This crate provides the pipeline that rebuilds a search collection from
//! the relational source.
//!
//! ## Architecture
//!
//! The pipeline follows the Fetcher-Processor-Loader pattern:
//!
//! 1. **Fetcher**: Pages one shard of the source with a keyset cursor
//! 2. **Processor**: Folds rows into search documents
//! 3. **Loader**: Bulk indexes documents into OpenSearch
//! 4. **Orchestrator**: Runs the fetcher and loader pools over one bounded channel

pub mod errors;
pub mod fetcher;
pub mod loader;
pub mod orchestrator;
pub mod processor;
pub mod progress;

pub use errors::PipelineError;
pub use fetcher::Fetcher;
pub use loader::{BulkLoader, LoaderConfig, LoaderSummary};
pub use orchestrator::{Orchestrator, OrchestratorConfig, ReindexCommand, DELTA_TOTAL_RANGE};
pub use progress::{Progress, ProgressSnapshot};
