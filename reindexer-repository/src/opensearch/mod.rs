//! OpenSearch implementation of the search engine client.

mod bulk;
mod client;
mod index_config;

pub use client::OpenSearchClient;
pub use index_config::IndexConfig;
