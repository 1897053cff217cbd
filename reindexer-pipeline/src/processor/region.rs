//! Region documents.

use std::sync::Arc;

use reindexer_shared::{GeoPoint, LocaleMap, RegionDocument, SuggestionSet};
use reindexer_source::RegionRow;

use crate::processor::group::{base_name, GroupAggregator};
use crate::processor::locale_cache::LocaleCache;

/// Folds a region's alternate-name rows into one document.
///
/// Suggestions pair the region name with the country name of the same
/// language: the base name with every localized country name, and each
/// alternate name with the country name in the alternate's language. A region
/// with no name at all gets no suggestions, never a bare country name.
pub struct RegionAggregator {
    countries: Arc<LocaleCache>,
}

impl RegionAggregator {
    pub fn new(countries: Arc<LocaleCache>) -> Self {
        Self { countries }
    }
}

impl GroupAggregator for RegionAggregator {
    type Row = RegionRow;
    type Output = RegionDocument;

    fn open(&self, row: &RegionRow) -> RegionDocument {
        let country_names = self.countries.names(&row.country_code).clone();
        let base = base_name(&row.name, &row.ascii_name);

        let mut suggestions = SuggestionSet::new();
        if !base.is_empty() {
            suggestions.add(&[base, self.countries.english(&row.country_code)]);
            for (_, country) in country_names.iter() {
                suggestions.add(&[base, country]);
            }
        }

        let mut names = LocaleMap::new();
        names.insert_first("en", base);

        RegionDocument {
            geoname_id: row.geoname_id,
            country_code: row.country_code.clone(),
            population: row.population,
            timezone: row.timezone.clone(),
            location: GeoPoint::new(row.latitude, row.longitude),
            names,
            country_names,
            suggestions,
        }
    }

    fn accumulate(&self, document: &mut RegionDocument, row: &RegionRow) {
        let base = base_name(&row.name, &row.ascii_name);
        let local: &str = if row.alt_name.is_empty() {
            base
        } else {
            &row.alt_name
        };

        if !row.lang.is_empty() && !row.alt_name.is_empty() && row.alt_name != base {
            document.names.insert_first(&row.lang, &row.alt_name);
        }

        if local.is_empty() {
            return;
        }

        if row.lang.is_empty() {
            document
                .suggestions
                .add(&[local, self.countries.english(&row.country_code)]);
            return;
        }

        let country = self.countries.name(&row.country_code, &row.lang);
        if !country.is_empty() {
            document.suggestions.add(&[local, country]);
        }
    }

    fn close(&self, document: &mut RegionDocument) {
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
