//! # Reindexer
//!
//! Main library for the geo, users and trips search reindexer.
//!
//! This crate provides the configuration and dependency wiring used by the
//! `reindexer` binary.

pub mod config;

pub use config::{Configuration, DatabaseSettings, Dependencies, SearchSettings};

use thiserror::Error;

/// Errors that can occur during reindexer initialization or execution.
#[derive(Error, Debug)]
pub enum ReindexError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] reindexer_pipeline::PipelineError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReindexError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
