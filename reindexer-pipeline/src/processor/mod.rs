//! Processor module for the reindexer pipeline.
//!
//! Turns source rows into documents. Geo rows arrive as key-groups (one row
//! per alternate name) and are folded by a `GroupAggregator`; user and trip
//! rows map one-to-one.

mod city;
mod group;
mod locale_cache;
mod region;
mod trip;
mod user;

pub use city::CityAggregator;
pub use group::{fold_groups, GroupAggregator};
pub use locale_cache::{CountryAggregator, LocaleCache};
pub use region::RegionAggregator;
pub use trip::trip_document;
pub use user::{parse_language_levels, user_profile};
