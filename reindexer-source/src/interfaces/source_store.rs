//! Source store trait definition.

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::rows::{CityRow, CountryRow, RegionRow, TripRow, UserRow};
use crate::types::{DeltaRequest, PageRequest};

/// Abstract interface over the relational store.
///
/// Paged methods return the rows of at most `request.limit` distinct keys that
/// belong to `request.shard` and are strictly greater than
/// `request.after_key`, ordered ascending by key. Rows sharing a key are
/// contiguous and ordered so that preferred and short names come first within
/// each language.
///
/// All implementations must be `Send + Sync` so a single store can serve every
/// fetcher task.
#[async_trait]
pub trait SourceStore: Send + Sync {
    /// Every country-like row joined with its alternate names, ordered by key
    /// then short-name and preferred-name flags descending.
    async fn fetch_countries(&self) -> Result<Vec<CountryRow>, SourceError>;

    /// One page of region rows joined with their alternate names.
    async fn fetch_region_page(&self, request: &PageRequest) -> Result<Vec<RegionRow>, SourceError>;

    /// One page of city rows joined with city and region alternate names.
    async fn fetch_city_page(&self, request: &PageRequest) -> Result<Vec<CityRow>, SourceError>;

    /// One page of searchable user rows, one row per user.
    async fn fetch_user_page(&self, request: &PageRequest) -> Result<Vec<UserRow>, SourceError>;

    /// One page of trip rows, one row per trip.
    async fn fetch_trip_page(&self, request: &PageRequest) -> Result<Vec<TripRow>, SourceError>;

    /// One page of the most recently changed users, ordered by
    /// `request.field` descending.
    async fn fetch_user_delta(&self, request: &DeltaRequest) -> Result<Vec<UserRow>, SourceError>;
}
