//! MySQL implementation of the source store.

mod client;
mod queries;

pub use client::{MySqlSource, SourceOptions};
