//! Trip scans.

use reindexer_shared::{DocumentVariant, ShardSpec};
use tracing::{info, instrument};

use crate::errors::PipelineError;
use crate::fetcher::Fetcher;
use crate::processor::trip_document;

impl Fetcher {
    /// Scan the trips of one shard.
    #[instrument(skip(self), fields(shard = shard.id()))]
    pub async fn trip_shard(&self, shard: ShardSpec) -> Result<u64, PipelineError> {
        let store = &self.store;

        let emitted = self
            .scan(
                "trip",
                shard,
                |request| async move { store.fetch_trip_page(&request).await },
                |rows| {
                    rows.into_iter()
                        .map(|row| trip_document(row).map(DocumentVariant::Trip))
                        .collect()
                },
            )
            .await?;

        info!(trips = emitted, "Finished trip shard");
        Ok(emitted)
    }
}
