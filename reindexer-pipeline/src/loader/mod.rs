//! Loader module for the reindexer pipeline.
//!
//! Drains documents from the pipeline channel into bulk requests.

use std::sync::Arc;

use async_channel::Receiver;
use reindexer_repository::SearchEngineClient;
use reindexer_shared::{BulkRow, DocumentVariant, IndexOperation};
use tracing::{debug, error, info, instrument};

use crate::errors::PipelineError;
use crate::progress::Progress;

/// Configuration for the bulk loader.
#[derive(Debug, Clone, Copy)]
pub struct LoaderConfig {
    /// Number of operations that triggers a flush.
    pub flush_threshold: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            flush_threshold: 500,
        }
    }
}

/// What one loader did before the channel closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderSummary {
    pub documents: u64,
    pub flushes: u64,
}

/// Loader that indexes documents into the search engine.
///
/// The loader is responsible for:
/// - Converting documents to index operations
/// - Batching operations and flushing once the threshold is reached
/// - Flushing the final partial batch after the channel closes
///
/// A rejected flush is returned as an error; nothing is retried.
pub struct BulkLoader {
    id: usize,
    client: Arc<dyn SearchEngineClient>,
    receiver: Receiver<DocumentVariant>,
    config: LoaderConfig,
    progress: Progress,
    batch: Vec<IndexOperation>,
    summary: LoaderSummary,
}

impl BulkLoader {
    pub fn new(
        id: usize,
        client: Arc<dyn SearchEngineClient>,
        receiver: Receiver<DocumentVariant>,
        config: LoaderConfig,
        progress: Progress,
    ) -> Self {
        Self {
            id,
            client,
            receiver,
            config,
            progress,
            batch: Vec::with_capacity(config.flush_threshold),
            summary: LoaderSummary::default(),
        }
    }

    /// Drain the channel until it is closed and empty.
    #[instrument(skip(self), fields(loader = self.id))]
    pub async fn run(mut self) -> Result<LoaderSummary, PipelineError> {
        while let Ok(document) = self.receiver.recv().await {
            self.batch.push(document.to_index_operation());

            if self.batch.len() >= self.config.flush_threshold {
                self.flush().await?;
            }
        }

        debug!("Pipeline channel closed");

        if !self.batch.is_empty() {
            info!(count = self.batch.len(), "Flushing final batch");
            self.flush().await?;
        }

        Ok(self.summary)
    }

    async fn flush(&mut self) -> Result<(), PipelineError> {
        let count = self.batch.len();

        if let Err(e) = self.client.bulk_index(&self.batch).await {
            error!(error = %e, count = count, "Bulk flush failed");
            return Err(e.into());
        }

        self.batch.clear();
        self.summary.documents += count as u64;
        self.summary.flushes += 1;
        let sent = self.progress.sent.add(count as u64);

        info!(
            count = count,
            backlog = self.receiver.len(),
            fetched = self.progress.fetched.snapshot(),
            sent = sent,
            "Bulk flush"
        );

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Recording search client shared by the loader and orchestrator tests.

    use async_trait::async_trait;
    use reindexer_repository::{SearchEngineClient, SearchError};
    use reindexer_shared::IndexOperation;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct RecordingClient {
        pub batches: Mutex<Vec<Vec<IndexOperation>>>,
        pub created: Mutex<Vec<String>>,
        pub fail_after: Option<usize>,
        pub unhealthy: bool,
        calls: AtomicUsize,
    }

    impl RecordingClient {
        pub fn failing_after(flushes: usize) -> Self {
            Self {
                fail_after: Some(flushes),
                ..Default::default()
            }
        }

        pub fn unhealthy() -> Self {
            Self {
                unhealthy: true,
                ..Default::default()
            }
        }

        pub fn batch_sizes(&self) -> Vec<usize> {
            let mut sizes: Vec<usize> = self.batches.lock().unwrap().iter().map(Vec::len).collect();
            sizes.sort_unstable_by(|a, b| b.cmp(a));
            sizes
        }

        pub fn operations(&self) -> Vec<IndexOperation> {
            let mut operations: Vec<IndexOperation> =
                self.batches.lock().unwrap().iter().flatten().cloned().collect();
            operations.sort_by(|a, b| (&a.collection, &a.id).cmp(&(&b.collection, &b.id)));
            operations
        }
    }

    #[async_trait]
    impl SearchEngineClient for RecordingClient {
        async fn bulk_index(&self, operations: &[IndexOperation]) -> Result<(), SearchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_after.is_some_and(|limit| call >= limit) {
                return Err(SearchError::bulk_index("mapper_parsing_exception"));
            }
            self.batches.lock().unwrap().push(operations.to_vec());
            Ok(())
        }

        async fn ensure_index_exists(&self, collection: &str) -> Result<(), SearchError> {
            self.created.lock().unwrap().push(collection.to_string());
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(!self.unhealthy)
        }
    }
}
