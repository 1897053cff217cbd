//! # Reindexer Source
//!
//! Read side of the reindexer. The pipeline only needs ordered, filtered,
//! paginated row pages; this crate defines that contract (`SourceStore`), the
//! row shapes it yields, and a MySQL implementation on top of `sqlx`.

pub mod errors;
pub mod interfaces;
pub mod mysql;
pub mod rows;
pub mod types;

pub use errors::SourceError;
pub use interfaces::SourceStore;
pub use mysql::{MySqlSource, SourceOptions};
pub use rows::{CityRow, CountryRow, RegionRow, TripRow, UserRow};
pub use types::{DeltaField, DeltaRequest, PageRequest, UnknownDeltaField};
