//! Fetcher module for the reindexer pipeline.
//!
//! A `Fetcher` reads pages from the source store, turns them into documents
//! and pushes those into the pipeline channel. One clone runs per shard; the
//! channel closes once every clone has been dropped.

mod cursor;
mod geo;
mod trips;
mod users;

use std::future::Future;
use std::sync::Arc;

use async_channel::Sender;
use reindexer_shared::{DocumentVariant, Identifiable, ShardSpec};
use reindexer_source::{PageRequest, SourceError, SourceStore};
use tracing::debug;

use crate::errors::PipelineError;
use crate::progress::Progress;

pub use cursor::ShardCursor;

/// Reads source pages and feeds documents to the pipeline channel.
#[derive(Clone)]
pub struct Fetcher {
    store: Arc<dyn SourceStore>,
    sender: Sender<DocumentVariant>,
    progress: Progress,
    page_size: u32,
}

impl Fetcher {
    pub fn new(
        store: Arc<dyn SourceStore>,
        sender: Sender<DocumentVariant>,
        progress: Progress,
        page_size: u32,
    ) -> Self {
        Self {
            store,
            sender,
            progress,
            page_size,
        }
    }

    /// Send `documents` in order, waiting while the channel is full.
    async fn emit(&self, documents: Vec<DocumentVariant>) -> Result<u64, PipelineError> {
        let count = documents.len() as u64;
        for document in documents {
            self.sender.send(document).await?;
        }
        self.progress.fetched.add(count);
        Ok(count)
    }

    /// Walk one shard page by page until the cursor is exhausted.
    ///
    /// `transform` sees whole pages; pages are limited by distinct key, so a
    /// key-group never spans two pages.
    async fn scan<R, F, Fut, T>(
        &self,
        kind: &'static str,
        shard: ShardSpec,
        mut fetch: F,
        mut transform: T,
    ) -> Result<u64, PipelineError>
    where
        R: Identifiable,
        F: FnMut(PageRequest) -> Fut,
        Fut: Future<Output = Result<Vec<R>, SourceError>>,
        T: FnMut(Vec<R>) -> Result<Vec<DocumentVariant>, PipelineError>,
    {
        let mut cursor = ShardCursor::new(shard, self.page_size);
        let mut emitted = 0u64;

        while let Some(request) = cursor.next_request() {
            let rows = fetch(request).await?;
            cursor.advance(&rows);
            emitted += self.emit(transform(rows)?).await?;
        }

        debug!(
            kind,
            shard = shard.id(),
            last_key = cursor.last_key(),
            documents = emitted,
            "Shard scan finished"
        );

        Ok(emitted)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! In-memory source store shared by the fetcher and orchestrator tests.

    use async_trait::async_trait;
    use reindexer_shared::Identifiable;
    use reindexer_source::{
        CityRow, CountryRow, DeltaField, DeltaRequest, PageRequest, RegionRow, SourceError, SourceStore,
        TripRow, UserRow,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves pages from vectors sorted by key, the way the SQL queries do.
    #[derive(Default)]
    pub struct MemorySource {
        pub countries: Vec<CountryRow>,
        pub regions: Vec<RegionRow>,
        pub cities: Vec<CityRow>,
        pub users: Vec<UserRow>,
        pub trips: Vec<TripRow>,
        pub page_calls: AtomicUsize,
        pub fail_pages: bool,
    }

    fn page<R: Identifiable + Clone>(rows: &[R], request: &PageRequest) -> Vec<R> {
        let mut keys: Vec<u64> = rows
            .iter()
            .map(Identifiable::id)
            .filter(|key| *key > request.after_key && request.shard.owns(*key))
            .collect();
        keys.dedup();
        keys.truncate(request.limit as usize);

        rows.iter()
            .filter(|row| keys.contains(&row.id()))
            .cloned()
            .collect()
    }

    impl MemorySource {
        fn check(&self) -> Result<(), SourceError> {
            self.page_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_pages {
                return Err(SourceError::query("connection reset"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl SourceStore for MemorySource {
        async fn fetch_countries(&self) -> Result<Vec<CountryRow>, SourceError> {
            Ok(self.countries.clone())
        }

        async fn fetch_region_page(
            &self,
            request: &PageRequest,
        ) -> Result<Vec<RegionRow>, SourceError> {
            self.check()?;
            Ok(page(&self.regions, request))
        }

        async fn fetch_city_page(&self, request: &PageRequest) -> Result<Vec<CityRow>, SourceError> {
            self.check()?;
            Ok(page(&self.cities, request))
        }

        async fn fetch_user_page(&self, request: &PageRequest) -> Result<Vec<UserRow>, SourceError> {
            self.check()?;
            Ok(page(&self.users, request))
        }

        async fn fetch_trip_page(&self, request: &PageRequest) -> Result<Vec<TripRow>, SourceError> {
            self.check()?;
            Ok(page(&self.trips, request))
        }

        async fn fetch_user_delta(
            &self,
            request: &DeltaRequest,
        ) -> Result<Vec<UserRow>, SourceError> {
            self.check()?;
            let mut users = self.users.clone();
            users.sort_by(|a, b| {
                let newest = match request.field {
                    DeltaField::Signup => b.signup.cmp(&a.signup),
                    DeltaField::LastLogin => b.last_login.cmp(&a.last_login),
                    DeltaField::Modified => b.modified.cmp(&a.modified),
                };
                newest.then(b.id.cmp(&a.id))
            });
            Ok(users
                .into_iter()
                .skip(request.offset as usize)
                .take(request.limit as usize)
                .collect())
        }
    }

    pub fn user(id: u64) -> UserRow {
        UserRow {
            id,
            username: format!("user{}", id),
            ..Default::default()
        }
    }
}
