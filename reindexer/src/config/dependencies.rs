//! Dependency initialization and wiring for the reindexer.

use std::sync::Arc;

use reindexer_pipeline::{Orchestrator, ReindexCommand};
use reindexer_repository::OpenSearchClient;
use reindexer_source::MySqlSource;
use tracing::info;

use crate::config::Configuration;
use crate::ReindexError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Connect the source and the search engine `command` needs.
    ///
    /// Geo commands read from the geo database, everything else from the
    /// main one.
    pub async fn new(
        configuration: &Configuration,
        command: &ReindexCommand,
    ) -> Result<Self, ReindexError> {
        let source_uri = match command {
            ReindexCommand::Geo => configuration.geo_uri(),
            _ => configuration.db.uri.as_str(),
        };

        info!(
            opensearch_url = %configuration.elasticsearch.uri,
            geo = matches!(command, ReindexCommand::Geo),
            "Initializing dependencies"
        );

        let source = MySqlSource::connect(&configuration.source_options(source_uri))
            .await
            .map_err(|e| ReindexError::config(format!("Failed to connect to MySQL: {}", e)))?;

        info!("MySQL connection pool created");

        let search_client =
            OpenSearchClient::new(&configuration.elasticsearch.uri, configuration.index_config())
                .await
                .map_err(|e| {
                    ReindexError::config(format!("Failed to create OpenSearch client: {}", e))
                })?;

        let orchestrator = Orchestrator::with_config(
            Arc::new(source),
            Arc::new(search_client),
            configuration.orchestrator_config(),
        );

        Ok(Self { orchestrator })
    }
}
