//! Error types for the reindexer source.

mod source_error;

pub use source_error::SourceError;
