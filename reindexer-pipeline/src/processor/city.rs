//! City documents.

use std::sync::Arc;

use reindexer_shared::{CityDocument, GeoPoint, LocaleMap, SuggestionSet};
use reindexer_source::CityRow;

use crate::processor::group::{base_name, GroupAggregator};
use crate::processor::locale_cache::LocaleCache;

/// Folds a city's rows, each carrying one city alternate name and the region
/// alternate name of the same language, into one document.
///
/// Suggestions come in two shapes, `City Country` and `City Region Country`,
/// each built from the names of one language.
pub struct CityAggregator {
    countries: Arc<LocaleCache>,
}

impl CityAggregator {
    pub fn new(countries: Arc<LocaleCache>) -> Self {
        Self { countries }
    }
}

impl GroupAggregator for CityAggregator {
    type Row = CityRow;
    type Output = CityDocument;

    fn open(&self, row: &CityRow) -> CityDocument {
        let country_names = self.countries.names(&row.country_code).clone();
        let country_en = self.countries.english(&row.country_code);
        let city = base_name(&row.name, &row.ascii_name);
        let region = base_name(&row.region_name, &row.region_ascii_name);

        let mut suggestions = SuggestionSet::new();
        if !city.is_empty() {
            suggestions.add(&[city, region, country_en]);
            suggestions.add(&[city, country_en]);
            for (_, country) in country_names.iter() {
                suggestions.add(&[city, country]);
            }
        }

        let mut names = LocaleMap::new();
        names.insert_first("en", city);
        let mut region_names = LocaleMap::new();
        region_names.insert_first("en", region);

        CityDocument {
            geoname_id: row.geoname_id,
            country_code: row.country_code.clone(),
            region_id: row.region_id,
            population: row.population,
            timezone: row.timezone.clone(),
            location: GeoPoint::new(row.latitude, row.longitude),
            names,
            region_names,
            country_names,
            suggestions,
        }
    }

    /// Record the row's alternate names and add its suggestions.
    ///
    /// The localized `City Country` suggestion uses the city's alternate name
    /// in that language when there is one, so "München Deutschland" rather
    /// than "Munich Deutschland". The base-name pairing is still produced by
    /// `open` and `close`.
    fn accumulate(&self, document: &mut CityDocument, row: &CityRow) {
        let base = base_name(&row.name, &row.ascii_name);
        let region_base = base_name(&row.region_name, &row.region_ascii_name);
        let city: &str = if row.alt_name.is_empty() {
            base
        } else {
            &row.alt_name
        };

        if !row.lang.is_empty() {
            if !row.alt_name.is_empty() && row.alt_name != base {
                document.names.insert_first(&row.lang, &row.alt_name);
            }
            if !row.region_alt_name.is_empty() && row.region_alt_name != region_base {
                document
                    .region_names
                    .insert_first(&row.lang, &row.region_alt_name);
            }
        }

        if city.is_empty() {
            return;
        }

        if row.lang.is_empty() {
            document
                .suggestions
                .add(&[city, self.countries.english(&row.country_code)]);
            return;
        }

        let country = self.countries.name(&row.country_code, &row.lang);
        if country.is_empty() {
            return;
        }

        let region: &str = if row.region_alt_name.is_empty() {
            region_base
        } else {
            &row.region_alt_name
        };
        document.suggestions.add(&[city, region, country]);
        document.suggestions.add(&[city, country]);
    }

    fn close(&self, document: &mut CityDocument) {
        let base = document.names.get("en").unwrap_or_default().to_string();
        if base.is_empty() {
            return;
        }

        for (lang, country) in document.country_names.iter() {
            if !document.names.contains(lang) {
                document.suggestions.add(&[base.as_str(), country]);
            }
        }
    }
}
