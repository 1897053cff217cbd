//! Search engine client trait definition.

use async_trait::async_trait;
use reindexer_shared::IndexOperation;

use crate::errors::SearchError;

/// Abstract interface for the destination of a reindex run.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`; one client is shared by every
/// loader task.
///
/// # Error Handling
///
/// Every method returns `Result<T, SearchError>`. Callers treat any error as
/// fatal for the run.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Submit a batch of index operations in a single bulk request.
    ///
    /// Operations are upserts keyed by `IndexOperation::id`, so submitting
    /// the same batch twice leaves the destination unchanged.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If every operation succeeded
    /// * `Err(SearchError::BulkIndexError)` - If the request or any item failed
    async fn bulk_index(&self, operations: &[IndexOperation]) -> Result<(), SearchError>;

    /// Ensure the index backing `collection` exists, creating it with its
    /// mappings when missing.
    async fn ensure_index_exists(&self, collection: &str) -> Result<(), SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the cluster status is green or yellow
    /// * `Ok(false)` - If the cluster reports red
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
