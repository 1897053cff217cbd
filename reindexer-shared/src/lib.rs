//! # Reindexer Shared
//!
//! Types shared by the source, pipeline and repository crates: the shard
//! partitioner, per-language name maps, suggestion sets and the closed set of
//! documents that flow through the pipeline.

pub mod document;
pub mod locale;
pub mod partition;
pub mod suggestion;
pub mod traits;

pub use document::{
    CityDocument, CountryDocument, DocumentVariant, GeoPoint, IndexOperation, LanguageLevel,
    RegionDocument, TripDocument, UserProfile, GEO_COLLECTION, TRIPS_COLLECTION,
    USERS_COLLECTION,
};
pub use locale::LocaleMap;
pub use partition::{PartitionError, ShardSpec};
pub use suggestion::SuggestionSet;
pub use traits::{index_operation, BulkRow, Identifiable, SearchDocument};
