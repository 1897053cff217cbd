//! Error types for the reindexer repository.

mod search_error;

pub use search_error::SearchError;
