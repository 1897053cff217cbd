//! Row shapes returned by the source store.
//!
//! Column names match the aliases used in `mysql::queries`. Nullable string
//! columns are coalesced to `''` in SQL, so an empty string means "absent".

use chrono::{NaiveDate, NaiveDateTime};
use reindexer_shared::Identifiable;
use sqlx::FromRow;

/// A country joined with one of its alternate names.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct CountryRow {
    pub geoname_id: u64,
    pub country_code: String,
    pub lang: String,
    pub name: String,
    pub population: i64,
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A region joined with one of its alternate names (if any).
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct RegionRow {
    pub geoname_id: u64,
    pub name: String,
    pub ascii_name: String,
    pub lang: String,
    pub alt_name: String,
    pub population: i64,
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
}

/// A city joined with one city alternate name and the region alternate name
/// in the same language.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct CityRow {
    pub geoname_id: u64,
    pub name: String,
    pub ascii_name: String,
    pub lang: String,
    pub alt_name: String,
    pub region_id: Option<u64>,
    pub region_name: String,
    pub region_ascii_name: String,
    pub region_alt_name: String,
    pub population: i64,
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country_code: String,
}

/// A searchable user with profile text and aggregated language lists.
///
/// `known_info` and `learn_info` hold `lang|level` pairs separated by commas.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct UserRow {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub signup: Option<NaiveDateTime>,
    pub last_login: Option<NaiveDateTime>,
    pub modified: Option<NaiveDateTime>,
    pub birth: Option<NaiveDate>,
    pub age: u64,
    pub sex: String,
    pub tz: String,
    pub city: String,
    pub wg_id: String,
    pub country: String,
    pub iso2: String,
    pub cont: String,
    pub main_photo_id: Option<u64>,
    pub photo_exists: bool,
    pub main_thumb: String,
    pub lfor_friend: bool,
    pub lfor_langex: bool,
    pub lfor_relation: bool,
    pub lfor_snail: bool,
    pub lfor_meet: bool,
    pub description: String,
    pub books: String,
    pub hobbies: String,
    pub movies: String,
    pub requests: String,
    pub music: String,
    pub quotes: String,
    pub tv: String,
    pub langex_desc: String,
    pub occupation: String,
    pub relationship: String,
    pub known_info: String,
    pub learn_info: String,
    pub city_name_en: String,
    pub city_id: Option<u64>,
    pub region_id: Option<u64>,
    pub country_code: String,
    pub home_city_name_en: String,
    pub home_city_id: Option<u64>,
    pub home_region_id: Option<u64>,
    pub home_country_code: String,
}

/// A trip.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct TripRow {
    pub id: u64,
    pub owner_id: u64,
    pub destination_id: u64,
    pub latitude: f64,
    pub longitude: f64,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub description: String,
    pub max_travelers: u64,
    pub acl: u64,
    pub open: bool,
    pub created_at: Option<NaiveDateTime>,
    pub city: String,
    pub country: String,
    pub trip_days: u64,
}

impl Identifiable for CountryRow {
    fn id(&self) -> u64 {
        self.geoname_id
    }
}

impl Identifiable for RegionRow {
    fn id(&self) -> u64 {
        self.geoname_id
    }
}

impl Identifiable for CityRow {
    fn id(&self) -> u64 {
        self.geoname_id
    }
}

impl Identifiable for UserRow {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Identifiable for TripRow {
    fn id(&self) -> u64 {
        self.id
    }
}
