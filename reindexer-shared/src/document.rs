//! Documents emitted by the pipeline and their wire representation.
//!
//! `DocumentVariant` is the closed set of everything a fetcher can hand to a
//! loader. Each variant knows its collection, kind tag and body; the loader
//! only ever sees `IndexOperation`s built from them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::locale::LocaleMap;
use crate::suggestion::SuggestionSet;
use crate::traits::{index_operation, BulkRow, Identifiable, SearchDocument};

/// Collection holding countries, regions and cities.
pub const GEO_COLLECTION: &str = "geo";
/// Collection holding user profiles.
pub const USERS_COLLECTION: &str = "users";
/// Collection holding trips.
pub const TRIPS_COLLECTION: &str = "trips";

/// Geographic coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `"lat,lon"` form accepted by geo_point fields.
    pub fn to_lat_lon(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// A country (political unit) with its names in every known language.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryDocument {
    pub geoname_id: u64,
    pub country_code: String,
    pub population: i64,
    pub timezone: String,
    pub location: GeoPoint,
    pub names: LocaleMap,
    pub suggestions: SuggestionSet,
}

/// A first-level administrative region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionDocument {
    pub geoname_id: u64,
    pub country_code: String,
    pub population: i64,
    pub timezone: String,
    pub location: GeoPoint,
    pub names: LocaleMap,
    pub country_names: LocaleMap,
    pub suggestions: SuggestionSet,
}

/// A populated place, denormalized with its region and country names.
#[derive(Debug, Clone, PartialEq)]
pub struct CityDocument {
    pub geoname_id: u64,
    pub country_code: String,
    pub region_id: Option<u64>,
    pub population: i64,
    pub timezone: String,
    pub location: GeoPoint,
    pub names: LocaleMap,
    pub region_names: LocaleMap,
    pub country_names: LocaleMap,
    pub suggestions: SuggestionSet,
}

/// A language with a proficiency level, as listed on a user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageLevel {
    pub lang: String,
    pub level: u8,
}

/// A searchable user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserProfile {
    #[serde(skip)]
    pub id: u64,
    pub name: String,
    pub username: String,
    pub signup: Option<NaiveDateTime>,
    pub last_login: Option<NaiveDateTime>,
    pub modified: Option<NaiveDateTime>,
    pub birth: Option<NaiveDate>,
    pub age: u8,
    pub sex: String,
    pub sex_bool: bool,
    pub tz: String,
    pub city: String,
    pub wg_id: String,
    pub country: String,
    pub iso2: String,
    #[serde(rename = "continent")]
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
    pub known: Vec<LanguageLevel>,
    pub learn: Vec<LanguageLevel>,
    pub city_name_en: String,
    pub city_id: Option<u64>,
    pub region_id: Option<u64>,
    pub country_code: String,
    pub home_city_name_en: String,
    pub home_city_id: Option<u64>,
    pub home_region_id: Option<u64>,
    pub home_country_code: String,
}

/// A planned trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripDocument {
    pub id: u64,
    pub owner_id: u64,
    pub destination_id: u64,
    pub location: GeoPoint,
    pub arrival_date: Option<NaiveDate>,
    pub departure_date: Option<NaiveDate>,
    pub description: String,
    pub max_travelers: u32,
    pub acl: u32,
    pub open: bool,
    pub created: Option<NaiveDateTime>,
    pub city: String,
    pub country: String,
    pub trip_days: u32,
}

/// Every document the pipeline can carry.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentVariant {
    Country(CountryDocument),
    Region(RegionDocument),
    City(CityDocument),
    User(UserProfile),
    Trip(TripDocument),
}

/// One index operation in the destination's wire representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexOperation {
    pub collection: String,
    pub kind: String,
    pub id: String,
    pub parent_id: Option<String>,
    pub body: Value,
}

fn geo_body(
    country_code: &str,
    location: &GeoPoint,
    population: i64,
    timezone: &str,
    suggestions: &SuggestionSet,
) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert("country_iso2".to_string(), json!(country_code));
    body.insert("location".to_string(), json!(location.to_lat_lon()));
    body.insert("population".to_string(), json!(population));
    body.insert("timezone".to_string(), json!(timezone));
    body.insert(
        "suggest".to_string(),
        Value::Array(suggestions.iter().map(Value::from).collect()),
    );
    body
}

fn insert_names(body: &mut Map<String, Value>, prefix: &str, names: &LocaleMap) {
    for (lang, name) in names.iter() {
        body.insert(format!("{}_{}", prefix, lang), json!(name));
    }
}

impl Identifiable for CountryDocument {
    fn id(&self) -> u64 {
        self.geoname_id
    }
}

impl SearchDocument for CountryDocument {
    fn collection(&self) -> &'static str {
        GEO_COLLECTION
    }

    fn kind(&self) -> &'static str {
        "country"
    }

    fn body(&self) -> Map<String, Value> {
        let mut body = geo_body(
            &self.country_code,
            &self.location,
            self.population,
            &self.timezone,
            &self.suggestions,
        );
        insert_names(&mut body, "country", &self.names);
        body
    }
}

impl Identifiable for RegionDocument {
    fn id(&self) -> u64 {
        self.geoname_id
    }
}

impl SearchDocument for RegionDocument {
    fn collection(&self) -> &'static str {
        GEO_COLLECTION
    }

    fn kind(&self) -> &'static str {
        "region"
    }

    fn body(&self) -> Map<String, Value> {
        let mut body = geo_body(
            &self.country_code,
            &self.location,
            self.population,
            &self.timezone,
            &self.suggestions,
        );
        insert_names(&mut body, "region", &self.names);
        insert_names(&mut body, "country", &self.country_names);
        body
    }
}

impl Identifiable for CityDocument {
    fn id(&self) -> u64 {
        self.geoname_id
    }
}

impl SearchDocument for CityDocument {
    fn collection(&self) -> &'static str {
        GEO_COLLECTION
    }

    fn kind(&self) -> &'static str {
        "city"
    }

    fn parent_id(&self) -> Option<u64> {
        self.region_id
    }

    fn body(&self) -> Map<String, Value> {
        let mut body = geo_body(
            &self.country_code,
            &self.location,
            self.population,
            &self.timezone,
            &self.suggestions,
        );
        insert_names(&mut body, "city", &self.names);
        insert_names(&mut body, "region", &self.region_names);
        insert_names(&mut body, "country", &self.country_names);
        body.insert(
            "regionid".to_string(),
            json!(self.region_id.map(|id| id.to_string()).unwrap_or_default()),
        );
        body
    }
}

impl Identifiable for UserProfile {
    fn id(&self) -> u64 {
        self.id
    }
}

impl SearchDocument for UserProfile {
    fn collection(&self) -> &'static str {
        USERS_COLLECTION
    }

    fn kind(&self) -> &'static str {
        "users"
    }

    fn body(&self) -> Map<String, Value> {
        // Plain fields and string-keyed values only, so this cannot fail.
        match serde_json::to_value(self) {
            Ok(Value::Object(body)) => body,
            _ => Map::new(),
        }
    }
}

impl Identifiable for TripDocument {
    fn id(&self) -> u64 {
        self.id
    }
}

impl SearchDocument for TripDocument {
    fn collection(&self) -> &'static str {
        TRIPS_COLLECTION
    }

    fn kind(&self) -> &'static str {
        "trip"
    }

    fn body(&self) -> Map<String, Value> {
        let body = json!({
            "id": self.id,
            "owner_id": self.owner_id,
            "destination_id": self.destination_id,
            "location": { "lat": self.location.lat, "lon": self.location.lon },
            "arrival_date": self.arrival_date,
            "departure_date": self.departure_date,
            "description": self.description,
            "max_travelers": self.max_travelers,
            "acl": self.acl,
            "open": self.open,
            "created": self.created,
            "city": self.city,
            "country": self.country,
            "trip_days": self.trip_days,
        });

        match body {
            Value::Object(body) => body,
            _ => Map::new(),
        }
    }
}

impl Identifiable for DocumentVariant {
    fn id(&self) -> u64 {
        match self {
            DocumentVariant::Country(doc) => doc.id(),
            DocumentVariant::Region(doc) => doc.id(),
            DocumentVariant::City(doc) => doc.id(),
            DocumentVariant::User(doc) => doc.id(),
            DocumentVariant::Trip(doc) => doc.id(),
        }
    }
}

impl BulkRow for DocumentVariant {
    fn to_index_operation(&self) -> IndexOperation {
        match self {
            DocumentVariant::Country(doc) => index_operation(doc),
            DocumentVariant::Region(doc) => index_operation(doc),
            DocumentVariant::City(doc) => index_operation(doc),
            DocumentVariant::User(doc) => index_operation(doc),
            DocumentVariant::Trip(doc) => index_operation(doc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city() -> CityDocument {
        let mut suggestions = SuggestionSet::new();
        suggestions.add(&["Lyon", "France"]);
        suggestions.add(&["Lyon", "Auvergne-Rhône-Alpes", "France"]);

        CityDocument {
            geoname_id: 2996944,
            country_code: "FR".to_string(),
            region_id: Some(11071625),
            population: 472317,
            timezone: "Europe/Paris".to_string(),
            location: GeoPoint::new(45.75, 4.85),
            names: [("en", "Lyon"), ("it", "Lione")].into_iter().collect(),
            region_names: [("en", "Auvergne-Rhône-Alpes")].into_iter().collect(),
            country_names: [("en", "France"), ("de", "Frankreich")].into_iter().collect(),
            suggestions,
        }
    }

    #[test]
    fn test_city_index_operation() {
        let op = DocumentVariant::City(city()).to_index_operation();

        assert_eq!(op.collection, "geo");
        assert_eq!(op.kind, "city");
        assert_eq!(op.id, "2996944");
        assert_eq!(op.parent_id, Some("11071625".to_string()));

        assert_eq!(op.body["type"], "city");
        assert_eq!(op.body["parent_id"], "11071625");
        assert_eq!(op.body["regionid"], "11071625");
        assert_eq!(op.body["city_it"], "Lione");
        assert_eq!(op.body["region_en"], "Auvergne-Rhône-Alpes");
        assert_eq!(op.body["country_de"], "Frankreich");
        assert_eq!(op.body["location"], "45.75,4.85");
        assert_eq!(
            op.body["suggest"],
            json!(["Lyon Auvergne-Rhône-Alpes France", "Lyon France"])
        );
    }

    #[test]
    fn test_country_has_no_parent() {
        let country = CountryDocument {
            geoname_id: 3017382,
            country_code: "FR".to_string(),
            population: 64768389,
            timezone: "Europe/Paris".to_string(),
            location: GeoPoint::new(46.0, 2.0),
            names: [("en", "France")].into_iter().collect(),
            suggestions: SuggestionSet::new(),
        };

        let op = DocumentVariant::Country(country).to_index_operation();

        assert_eq!(op.kind, "country");
        assert!(op.parent_id.is_none());
        assert!(op.body.get("parent_id").is_none());
        assert_eq!(op.body["country_en"], "France");
    }

    #[test]
    fn test_user_body_skips_id() {
        let user = UserProfile {
            id: 42,
            username: "traveler".to_string(),
            cont: "EU".to_string(),
            wg_id: "4812".to_string(),
            known: vec![LanguageLevel {
                lang: "en".to_string(),
                level: 5,
            }],
            ..Default::default()
        };

        let op = DocumentVariant::User(user).to_index_operation();

        assert_eq!(op.collection, "users");
        assert_eq!(op.id, "42");
        assert!(op.body.get("id").is_none());
        assert_eq!(op.body["continent"], "EU");
        assert_eq!(op.body["wg_id"], "4812");
        assert_eq!(op.body["known"], json!([{ "lang": "en", "level": 5 }]));
    }

    #[test]
    fn test_trip_location_is_object() {
        let trip = TripDocument {
            id: 7,
            location: GeoPoint::new(1.5, -2.25),
            ..Default::default()
        };

        let op = DocumentVariant::Trip(trip).to_index_operation();

        assert_eq!(op.collection, "trips");
        assert_eq!(op.kind, "trip");
        assert_eq!(op.body["location"], json!({ "lat": 1.5, "lon": -2.25 }));
    }
}
