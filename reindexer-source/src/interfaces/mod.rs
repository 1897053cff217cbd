//! Interface definitions for the source store.
//!
//! The pipeline depends on `SourceStore` only, so the MySQL implementation can
//! be swapped for an in-memory one in tests.

mod source_store;

pub use source_store::SourceStore;
