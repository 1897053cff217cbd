//! Interface definitions for the search engine client.
//!
//! The loaders only see `SearchEngineClient`, so the OpenSearch backend can be
//! replaced by an in-memory recorder in tests.

mod search_engine_client;

pub use search_engine_client::SearchEngineClient;
