//! Country documents and the country-code to localized-name cache.
//!
//! Regions and cities need the country name in every language to build their
//! suggestions, so the cache is built once from the country rows before any
//! region or city is fetched, and is read-only afterwards.

use std::collections::BTreeMap;

use reindexer_shared::{CountryDocument, GeoPoint, LocaleMap, SuggestionSet};
use reindexer_source::CountryRow;

use crate::processor::group::{fold_groups, GroupAggregator};

/// Folds the alternate-name rows of one country.
///
/// The first name per language wins, and every name becomes a suggestion.
#[derive(Debug, Default)]
pub struct CountryAggregator;

impl GroupAggregator for CountryAggregator {
    type Row = CountryRow;
    type Output = CountryDocument;

    fn open(&self, row: &CountryRow) -> CountryDocument {
        CountryDocument {
            geoname_id: row.geoname_id,
            country_code: row.country_code.clone(),
            population: row.population,
            timezone: row.timezone.clone(),
            location: GeoPoint::new(row.latitude, row.longitude),
            names: LocaleMap::new(),
            suggestions: SuggestionSet::new(),
        }
    }

    fn accumulate(&self, document: &mut CountryDocument, row: &CountryRow) {
        document.names.insert_first(&row.lang, &row.name);
        document.suggestions.add(&[row.name.as_str()]);
    }
}

/// Country code to localized country names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleCache {
    countries: BTreeMap<String, LocaleMap>,
    empty: LocaleMap,
}

impl LocaleCache {
    /// Fold the country rows into documents and index their names by country
    /// code.
    ///
    /// When several political units share a country code, the one with the
    /// lowest key fills each language first.
    pub fn build(rows: &[CountryRow]) -> (Self, Vec<CountryDocument>) {
        let documents = fold_groups(&CountryAggregator, rows);
        let mut countries: BTreeMap<String, LocaleMap> = BTreeMap::new();

        for document in &documents {
            countries
                .entry(document.country_code.clone())
                .or_default()
                .merge_first(&document.names);
        }

        let cache = Self {
            countries,
            empty: LocaleMap::new(),
        };
        (cache, documents)
    }

    /// Names of `country_code` in every known language; empty when unknown.
    pub fn names(&self, country_code: &str) -> &LocaleMap {
        self.countries.get(country_code).unwrap_or(&self.empty)
    }

    /// Name of `country_code` in `lang`, or `""`.
    pub fn name(&self, country_code: &str, lang: &str) -> &str {
        self.names(country_code).get(lang).unwrap_or_default()
    }

    /// English name of `country_code`, or `""`.
    pub fn english(&self, country_code: &str) -> &str {
        self.name(country_code, "en")
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

impl FromIterator<(String, LocaleMap)> for LocaleCache {
    fn from_iter<I: IntoIterator<Item = (String, LocaleMap)>>(iter: I) -> Self {
        Self {
            countries: iter.into_iter().collect(),
            empty: LocaleMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(geoname_id: u64, code: &str, lang: &str, name: &str) -> CountryRow {
        CountryRow {
            geoname_id,
            country_code: code.to_string(),
            lang: lang.to_string(),
            name: name.to_string(),
            population: 1000,
            timezone: "Europe/Berlin".to_string(),
            latitude: 51.5,
            longitude: 10.5,
        }
    }

    #[test]
    fn test_build_first_name_per_language_wins() {
        let rows = vec![
            row(2921044, "DE", "en", "Germany"),
            row(2921044, "DE", "de", "Deutschland"),
            row(2921044, "DE", "de", "Bundesrepublik Deutschland"),
            row(2921044, "DE", "", "Allemagne"),
            row(3017382, "FR", "en", "France"),
            row(3017382, "FR", "de", "Frankreich"),
        ];

        let (cache, documents) = LocaleCache::build(&rows);

        assert_eq!(documents.len(), 2);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.name("DE", "de"), "Deutschland");
        assert_eq!(cache.english("FR"), "France");
        assert_eq!(cache.name("FR", "it"), "");
        assert!(cache.names("XX").is_empty());

        let germany = &documents[0];
        assert_eq!(germany.geoname_id, 2921044);
        assert_eq!(germany.names.len(), 2);
        assert!(!germany.names.contains(""));
        // Every alternate name, empty-language ones included, is a suggestion.
        assert!(germany.suggestions.contains("Bundesrepublik Deutschland"));
        assert!(germany.suggestions.contains("Allemagne"));
    }

    #[test]
    fn test_shared_country_code_lowest_key_first() {
        let rows = vec![
            row(1, "NO", "en", "Norway"),
            row(2, "NO", "en", "Svalbard"),
            row(2, "NO", "nb", "Svalbard og Jan Mayen"),
        ];

        let (cache, documents) = LocaleCache::build(&rows);

        assert_eq!(documents.len(), 2);
        assert_eq!(cache.english("NO"), "Norway");
        assert_eq!(cache.name("NO", "nb"), "Svalbard og Jan Mayen");
    }
}
