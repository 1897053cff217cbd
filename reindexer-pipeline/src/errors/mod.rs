//! Error types for the reindexer pipeline.

use reindexer_repository::SearchError;
use reindexer_source::SourceError;
use thiserror::Error;

/// Errors that can occur while running the pipeline.
///
/// Every variant is fatal for the run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Reading from the source store failed.
    #[error("Source error: {0}")]
    SourceError(#[from] SourceError),

    /// Writing to the search engine failed.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),

    /// A source row could not be turned into a document.
    #[error("Processor error: {0}")]
    ProcessorError(String),

    /// The pipeline channel was closed while a fetcher was still sending.
    #[error("Channel error: {0}")]
    ChannelError(String),

    /// A worker task panicked or was cancelled.
    #[error("Task error: {0}")]
    TaskError(String),

    /// The pipeline was configured with invalid sizes or counts.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl PipelineError {
    /// Create a processor error.
    pub fn processor(msg: impl Into<String>) -> Self {
        Self::ProcessorError(msg.into())
    }

    /// Create a channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::ChannelError(msg.into())
    }

    /// Create a task error.
    pub fn task(msg: impl Into<String>) -> Self {
        Self::TaskError(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskError(err.to_string())
    }
}

impl<T> From<async_channel::SendError<T>> for PipelineError {
    fn from(_: async_channel::SendError<T>) -> Self {
        Self::ChannelError("pipeline channel closed before the fetch finished".to_string())
    }
}
