//! OpenSearch index naming, settings and mappings.
//!
//! One index per collection. Geo documents carry localized name fields
//! (`city_<lang>`, `region_<lang>`, `country_<lang>`) whose languages are not
//! known up front, so they are mapped through dynamic templates.

use reindexer_shared::{GEO_COLLECTION, TRIPS_COLLECTION, USERS_COLLECTION};
use serde_json::{json, Map, Value};

/// Index naming and sizing shared by every collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Prepended to the collection name, e.g. `staging_` gives `staging_geo`.
    pub prefix: String,
    pub number_of_shards: u32,
    pub number_of_replicas: u32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            number_of_shards: 1,
            number_of_replicas: 1,
        }
    }
}

impl IndexConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// Index name backing `collection`.
    pub fn index_name(&self, collection: &str) -> String {
        format!("{}{}", self.prefix, collection)
    }

    /// Settings and mappings for a new index of `collection`.
    pub fn index_settings(&self, collection: &str) -> Value {
        json!({
            "settings": {
                "number_of_shards": self.number_of_shards,
                "number_of_replicas": self.number_of_replicas
            },
            "mappings": mappings(collection)
        })
    }
}

fn mappings(collection: &str) -> Value {
    match collection {
        GEO_COLLECTION => geo_mappings(),
        USERS_COLLECTION => user_mappings(),
        TRIPS_COLLECTION => trip_mappings(),
        _ => json!({}),
    }
}

fn localized_template(prefix: &str) -> Value {
    let mut template = Map::new();
    template.insert(
        format!("{}_names", prefix),
        json!({
            "match": format!("{}_*", prefix),
            "match_mapping_type": "string",
            "mapping": {
                "type": "text",
                "fields": { "raw": { "type": "keyword" } }
            }
        }),
    );
    Value::Object(template)
}

fn geo_mappings() -> Value {
    json!({
        "dynamic_templates": [
            localized_template("city"),
            localized_template("region"),
            localized_template("country")
        ],
        "properties": {
            "type": { "type": "keyword" },
            "parent_id": { "type": "keyword" },
            "regionid": { "type": "keyword" },
            "country_iso2": { "type": "keyword" },
            "location": { "type": "geo_point" },
            "population": { "type": "long" },
            "timezone": { "type": "keyword" },
            "suggest": { "type": "completion" }
        }
    })
}

fn language_levels() -> Value {
    json!({
        "type": "nested",
        "properties": {
            "lang": { "type": "keyword" },
            "level": { "type": "byte" }
        }
    })
}

fn user_mappings() -> Value {
    let mut properties = json!({
        "type": { "type": "keyword" },
        "name": { "type": "text" },
        "username": { "type": "keyword" },
        "signup": { "type": "date" },
        "last_login": { "type": "date" },
        "modified": { "type": "date" },
        "birth": { "type": "date" },
        "age": { "type": "byte" },
        "sex": { "type": "keyword" },
        "sex_bool": { "type": "boolean" },
        "tz": { "type": "keyword" },
        "iso2": { "type": "keyword" },
        "wg_id": { "type": "keyword" },
        "continent": { "type": "keyword" },
        "country_code": { "type": "keyword" },
        "home_country_code": { "type": "keyword" },
        "known": language_levels(),
        "learn": language_levels()
    });

    if let Some(map) = properties.as_object_mut() {
        for field in [
            "description",
            "books",
            "hobbies",
            "movies",
            "requests",
            "music",
            "quotes",
            "tv",
            "langex_desc",
            "occupation",
        ] {
            map.insert(field.to_string(), json!({ "type": "text" }));
        }
    }

    json!({ "properties": properties })
}

fn trip_mappings() -> Value {
    json!({
        "properties": {
            "type": { "type": "keyword" },
            "owner_id": { "type": "long" },
            "destination_id": { "type": "long" },
            "location": { "type": "geo_point" },
            "arrival_date": { "type": "date" },
            "departure_date": { "type": "date" },
            "description": { "type": "text" },
            "max_travelers": { "type": "integer" },
            "acl": { "type": "integer" },
            "open": { "type": "boolean" },
            "created": { "type": "date" },
            "city": { "type": "keyword" },
            "country": { "type": "keyword" },
            "trip_days": { "type": "integer" }
        }
    })
}
