//! Orchestrator module for the reindexer pipeline.
//!
//! Wires the fetcher pool to the loader pool through one bounded channel and
//! waits for both to finish.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::Arc;

use reindexer_repository::{SearchEngineClient, SearchError};
use reindexer_shared::{
    DocumentVariant, ShardSpec, GEO_COLLECTION, TRIPS_COLLECTION, USERS_COLLECTION,
};
use reindexer_source::{DeltaField, SourceStore};
use tokio::task::JoinSet;
use tracing::{info, instrument};

use crate::errors::PipelineError;
use crate::fetcher::Fetcher;
use crate::loader::{BulkLoader, LoaderConfig, LoaderSummary};
use crate::progress::{Progress, ProgressSnapshot};

/// Accepted values for the delta scan's `max_total`.
pub const DELTA_TOTAL_RANGE: RangeInclusive<u64> = 100..=100_000;

/// Configuration for the orchestrator.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Number of fetcher shards.
    pub shard_count: u32,
    /// Number of loader tasks.
    pub loader_count: usize,
    /// Distinct keys per source page.
    pub page_size: u32,
    /// Operations per bulk request.
    pub flush_threshold: usize,
    /// Capacity of the pipeline channel.
    pub channel_capacity: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            shard_count: 4,
            loader_count: 4,
            page_size: 1000,
            flush_threshold: 500,
            channel_capacity: 10_000,
        }
    }
}

impl OrchestratorConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        let checks = [
            ("shard count", self.shard_count as usize),
            ("loader count", self.loader_count),
            ("page size", self.page_size as usize),
            ("flush threshold", self.flush_threshold),
            ("channel capacity", self.channel_capacity),
        ];

        for (name, value) in checks {
            if value == 0 {
                return Err(PipelineError::configuration(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }

        Ok(())
    }
}

/// What a run reindexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReindexCommand {
    /// Countries, regions and cities.
    Geo,
    Users,
    Trips,
    /// The `max_total` most recently changed users, newest first by `field`.
    UsersDelta { field: DeltaField, max_total: u64 },
}

impl ReindexCommand {
    /// Collection the command writes to.
    pub fn collection(&self) -> &'static str {
        match self {
            ReindexCommand::Geo => GEO_COLLECTION,
            ReindexCommand::Users | ReindexCommand::UsersDelta { .. } => USERS_COLLECTION,
            ReindexCommand::Trips => TRIPS_COLLECTION,
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if let ReindexCommand::UsersDelta { max_total, .. } = self {
            if !DELTA_TOTAL_RANGE.contains(max_total) {
                return Err(PipelineError::configuration(format!(
                    "delta total must be between {} and {}, got {}",
                    DELTA_TOTAL_RANGE.start(),
                    DELTA_TOTAL_RANGE.end(),
                    max_total
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for ReindexCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReindexCommand::Geo => f.write_str("geo"),
            ReindexCommand::Users => f.write_str("users"),
            ReindexCommand::Trips => f.write_str("trips"),
            ReindexCommand::UsersDelta { field, max_total } => {
                write!(f, "users-delta({}, {})", field, max_total)
            }
        }
    }
}

/// Orchestrator that runs one reindex.
///
/// The orchestrator:
/// - Checks the search engine and bootstraps the target index
/// - Spawns one fetcher per shard and the loader pool
/// - Closes the channel only after every fetcher is done
/// - Returns the first error from any worker
pub struct Orchestrator {
    store: Arc<dyn SourceStore>,
    client: Arc<dyn SearchEngineClient>,
    config: OrchestratorConfig,
    progress: Progress,
}

impl Orchestrator {
    /// Create a new orchestrator with the default configuration.
    pub fn new(store: Arc<dyn SourceStore>, client: Arc<dyn SearchEngineClient>) -> Self {
        Self::with_config(store, client, OrchestratorConfig::default())
    }

    /// Create a new orchestrator with custom configuration.
    pub fn with_config(
        store: Arc<dyn SourceStore>,
        client: Arc<dyn SearchEngineClient>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            store,
            client,
            config,
            progress: Progress::new(),
        }
    }

    /// Counters of the current run, shared with every worker.
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    /// Run `command` to completion.
    #[instrument(skip(self), fields(command = %command))]
    pub async fn run(&self, command: ReindexCommand) -> Result<ProgressSnapshot, PipelineError> {
        self.config.validate()?;
        command.validate()?;

        info!(
            shards = self.config.shard_count,
            loaders = self.config.loader_count,
            page_size = self.config.page_size,
            flush_threshold = self.config.flush_threshold,
            channel_capacity = self.config.channel_capacity,
            "Starting reindex"
        );

        if !self.client.health_check().await? {
            return Err(SearchError::connection("search engine cluster is unhealthy").into());
        }
        self.client.ensure_index_exists(command.collection()).await?;

        let (sender, receiver) = async_channel::bounded(self.config.channel_capacity);
        let fetcher = Fetcher::new(
            Arc::clone(&self.store),
            sender,
            self.progress.clone(),
            self.config.page_size,
        );

        let (summary, fetched) = tokio::try_join!(
            self.load_phase(receiver),
            self.fetch_phase(command, fetcher)
        )?;

        let snapshot = self.progress.snapshot();
        info!(
            fetched = snapshot.fetched,
            sent = snapshot.sent,
            shard_documents = fetched,
            flushes = summary.flushes,
            "Reindex finished"
        );

        Ok(snapshot)
    }

    /// Spawn the fetchers for `command` and wait for all of them.
    ///
    /// Every task owns a clone of `fetcher`; the channel closes when the last
    /// one is dropped.
    async fn fetch_phase(
        &self,
        command: ReindexCommand,
        fetcher: Fetcher,
    ) -> Result<u64, PipelineError> {
        let mut tasks: JoinSet<Result<u64, PipelineError>> = JoinSet::new();
        match command {
            ReindexCommand::Geo => {
                let countries = fetcher.countries().await?;

                for shard in self.shards()? {
                    let fetcher = fetcher.clone();
                    let countries = Arc::clone(&countries);
                    tasks.spawn(async move { fetcher.geo_shard(shard, countries).await });
                }
            }
            ReindexCommand::Users => {
                for shard in self.shards()? {
                    let fetcher = fetcher.clone();
                    tasks.spawn(async move { fetcher.user_shard(shard).await });
                }
            }
            ReindexCommand::Trips => {
                for shard in self.shards()? {
                    let fetcher = fetcher.clone();
                    tasks.spawn(async move { fetcher.trip_shard(shard).await });
                }
            }
            ReindexCommand::UsersDelta { field, max_total } => {
                let fetcher = fetcher.clone();
                tasks.spawn(async move { fetcher.user_delta(field, max_total).await });
            }
        }
        drop(fetcher);

        let mut emitted = 0u64;
        while let Some(result) = tasks.join_next().await {
            emitted += result??;
        }

        info!(
            fetched = self.progress.fetched.snapshot(),
            "All fetchers finished, pipeline channel closed"
        );

        Ok(emitted)
    }

    /// Spawn the loader pool and wait until every loader has drained the
    /// channel and flushed its last batch.
    async fn load_phase(
        &self,
        receiver: async_channel::Receiver<DocumentVariant>,
    ) -> Result<LoaderSummary, PipelineError> {
        let mut tasks = JoinSet::new();
        let config = LoaderConfig {
            flush_threshold: self.config.flush_threshold,
        };

        for id in 0..self.config.loader_count {
            let loader = BulkLoader::new(
                id,
                Arc::clone(&self.client),
                receiver.clone(),
                config,
                self.progress.clone(),
            );
            tasks.spawn(loader.run());
        }
        drop(receiver);

        let mut total = LoaderSummary::default();
        while let Some(result) = tasks.join_next().await {
            let summary = result??;
            total.documents += summary.documents;
            total.flushes += summary.flushes;
        }

        Ok(total)
    }

    fn shards(&self) -> Result<Vec<ShardSpec>, PipelineError> {
        ShardSpec::all(self.config.shard_count)
            .map_err(|e| PipelineError::configuration(e.to_string()))
    }
}
