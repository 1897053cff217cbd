//! User scans, full and delta.

use reindexer_shared::{DocumentVariant, ShardSpec};
use reindexer_source::{DeltaField, DeltaRequest};
use tracing::{debug, info, instrument};

use crate::errors::PipelineError;
use crate::fetcher::Fetcher;
use crate::processor::user_profile;

impl Fetcher {
    /// Scan the searchable users of one shard.
    #[instrument(skip(self), fields(shard = shard.id()))]
    pub async fn user_shard(&self, shard: ShardSpec) -> Result<u64, PipelineError> {
        let store = &self.store;

        let emitted = self
            .scan(
                "users",
                shard,
                |request| async move { store.fetch_user_page(&request).await },
                |rows| {
                    rows.into_iter()
                        .map(|row| user_profile(row).map(DocumentVariant::User))
                        .collect()
                },
            )
            .await?;

        info!(users = emitted, "Finished user shard");
        Ok(emitted)
    }

    /// Read up to `max_total` of the most recently changed users, newest
    /// first by `field`.
    ///
    /// Stops early on an empty or short page. Runs are independent: a user
    /// near the cutoff may be read again by the next run.
    #[instrument(skip(self))]
    pub async fn user_delta(&self, field: DeltaField, max_total: u64) -> Result<u64, PipelineError> {
        let mut offset = 0u64;

        while offset < max_total {
            let limit = u32::try_from(max_total - offset)
                .unwrap_or(u32::MAX)
                .min(self.page_size);
            if limit == 0 {
                break;
            }

            let rows = self
                .store
                .fetch_user_delta(&DeltaRequest {
                    field,
                    limit,
                    offset,
                })
                .await?;
            let fetched = rows.len() as u64;

            let documents = rows
                .into_iter()
                .map(|row| user_profile(row).map(DocumentVariant::User))
                .collect::<Result<Vec<_>, _>>()?;
            self.emit(documents).await?;

            offset += fetched;
            debug!(offset, "Fetched delta page");

            if fetched < u64::from(limit) {
                break;
            }
        }

        info!(users = offset, "Finished delta scan");
        Ok(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::test_support::{user, MemorySource};
    use crate::progress::Progress;
    use reindexer_shared::Identifiable;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    async fn drain(receiver: async_channel::Receiver<DocumentVariant>) -> Vec<u64> {
        let mut ids = Vec::new();
        while let Ok(document) = receiver.recv().await {
            ids.push(document.id());
        }
        ids
    }

    #[tokio::test]
    async fn test_user_shard_pages_until_short_page() {
        let source = Arc::new(MemorySource {
            users: (1..=10).map(user).collect(),
            ..Default::default()
        });
        let (sender, receiver) = async_channel::unbounded();
        let fetcher = Fetcher::new(source.clone(), sender, Progress::new(), 4);

        let emitted = fetcher.user_shard(ShardSpec::whole()).await.unwrap();
        drop(fetcher);

        assert_eq!(emitted, 10);
        assert_eq!(drain(receiver).await, (1..=10).collect::<Vec<_>>());
        // 4 + 4 + 2, the short page ends the scan.
        assert_eq!(source.page_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_user_shard_exact_multiple_needs_empty_page() {
        let source = Arc::new(MemorySource {
            users: (1..=8).map(user).collect(),
            ..Default::default()
        });
        let (sender, _receiver) = async_channel::unbounded();
        let fetcher = Fetcher::new(source.clone(), sender, Progress::new(), 4);

        fetcher.user_shard(ShardSpec::whole()).await.unwrap();

        assert_eq!(source.page_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_malformed_user_is_fatal() {
        let mut broken = user(2);
        broken.known_info = "en|native".to_string();
        let source = Arc::new(MemorySource {
            users: vec![user(1), broken],
            ..Default::default()
        });
        let (sender, _receiver) = async_channel::unbounded();
        let fetcher = Fetcher::new(source, sender, Progress::new(), 10);

        let result = fetcher.user_shard(ShardSpec::whole()).await;

        assert!(matches!(result, Err(PipelineError::ProcessorError(_))));
    }

    #[tokio::test]
    async fn test_user_delta_stops_at_max_total() {
        let source = Arc::new(MemorySource {
            users: (1..=500).map(user).collect(),
            ..Default::default()
        });
        let (sender, receiver) = async_channel::unbounded();
        let fetcher = Fetcher::new(source.clone(), sender, Progress::new(), 30);

        let fetched = fetcher.user_delta(DeltaField::Modified, 100).await.unwrap();
        drop(fetcher);

        assert_eq!(fetched, 100);
        let ids = drain(receiver).await;
        assert_eq!(ids.len(), 100);
        assert_eq!(ids[0], 500);
        assert_eq!(ids[99], 401);
        // 30 + 30 + 30 + 10
        assert_eq!(source.page_calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_user_delta_stops_when_source_runs_out() {
        let source = Arc::new(MemorySource {
            users: (1..=45).map(user).collect(),
            ..Default::default()
        });
        let (sender, _receiver) = async_channel::unbounded();
        let fetcher = Fetcher::new(source, sender, Progress::new(), 30);

        let fetched = fetcher.user_delta(DeltaField::Signup, 1000).await.unwrap();

        assert_eq!(fetched, 45);
    }
}
