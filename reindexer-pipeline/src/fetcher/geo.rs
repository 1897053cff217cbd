//! Country, region and city scans.

use std::sync::Arc;

use reindexer_shared::{DocumentVariant, ShardSpec};
use tracing::{info, instrument};

use crate::errors::PipelineError;
use crate::fetcher::Fetcher;
use crate::processor::{fold_groups, CityAggregator, LocaleCache, RegionAggregator};

impl Fetcher {
    /// Read every country once, emit the country documents and return the
    /// locale cache regions and cities are built from.
    #[instrument(skip(self))]
    pub async fn countries(&self) -> Result<Arc<LocaleCache>, PipelineError> {
        let rows = self.store.fetch_countries().await?;
        let (cache, documents) = LocaleCache::build(&rows);

        let emitted = self
            .emit(documents.into_iter().map(DocumentVariant::Country).collect())
            .await?;

        info!(
            rows = rows.len(),
            countries = emitted,
            country_codes = cache.len(),
            "Built country locale cache"
        );

        Ok(Arc::new(cache))
    }

    /// Scan the regions, then the cities, of one shard.
    #[instrument(skip(self, countries), fields(shard = shard.id()))]
    pub async fn geo_shard(
        &self,
        shard: ShardSpec,
        countries: Arc<LocaleCache>,
    ) -> Result<u64, PipelineError> {
        let store = &self.store;

        let regions = RegionAggregator::new(Arc::clone(&countries));
        let region_count = self
            .scan(
                "region",
                shard,
                |request| async move { store.fetch_region_page(&request).await },
                |rows| {
                    Ok(fold_groups(&regions, &rows)
                        .into_iter()
                        .map(DocumentVariant::Region)
                        .collect())
                },
            )
            .await?;

        let cities = CityAggregator::new(countries);
        let city_count = self
            .scan(
                "city",
                shard,
                |request| async move { store.fetch_city_page(&request).await },
                |rows| {
                    Ok(fold_groups(&cities, &rows)
                        .into_iter()
                        .map(DocumentVariant::City)
                        .collect())
                },
            )
            .await?;

        info!(
            regions = region_count,
            cities = city_count,
            "Finished geo shard"
        );

        Ok(region_count + city_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::test_support::MemorySource;
    use crate::progress::Progress;
    use reindexer_shared::Identifiable;
    use reindexer_source::{CityRow, CountryRow, RegionRow};

    fn source() -> MemorySource {
        let country = |lang: &str, name: &str| CountryRow {
            geoname_id: 2921044,
            country_code: "DE".to_string(),
            lang: lang.to_string(),
            name: name.to_string(),
            ..Default::default()
        };
        let region = |id: u64, lang: &str, alt: &str| RegionRow {
            geoname_id: id,
            name: format!("Region {}", id),
            lang: lang.to_string(),
            alt_name: alt.to_string(),
            country_code: "DE".to_string(),
            ..Default::default()
        };
        let city = |id: u64, lang: &str, alt: &str| CityRow {
            geoname_id: id,
            name: format!("City {}", id),
            lang: lang.to_string(),
            alt_name: alt.to_string(),
            region_id: Some(1),
            region_name: "Region 1".to_string(),
            country_code: "DE".to_string(),
            ..Default::default()
        };

        MemorySource {
            countries: vec![country("en", "Germany"), country("de", "Deutschland")],
            regions: vec![
                region(1, "de", "Gebiet 1"),
                region(1, "fr", "Région 1"),
                region(2, "", ""),
                region(3, "de", "Gebiet 3"),
            ],
            cities: (10..20)
                .flat_map(|id| vec![city(id, "de", "Stadt"), city(id, "it", "Città")])
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_geo_shard_emits_one_document_per_key() {
        let (sender, receiver) = async_channel::unbounded();
        let progress = Progress::new();
        let fetcher = Fetcher::new(Arc::new(source()), sender, progress.clone(), 3);

        let countries = fetcher.countries().await.unwrap();
        let emitted = fetcher.geo_shard(ShardSpec::whole(), countries).await.unwrap();
        drop(fetcher);

        let mut documents = Vec::new();
        while let Ok(document) = receiver.recv().await {
            documents.push(document);
        }

        assert_eq!(emitted, 3 + 10);
        assert_eq!(documents.len(), 1 + 3 + 10);
        assert_eq!(progress.snapshot().fetched, 14);

        let regions: Vec<u64> = documents
            .iter()
            .filter(|d| matches!(d, DocumentVariant::Region(_)))
            .map(|d| d.id())
            .collect();
        assert_eq!(regions, vec![1, 2, 3]);

        match &documents[1] {
            DocumentVariant::Region(region) => {
                assert_eq!(region.names.get("de"), Some("Gebiet 1"));
                assert_eq!(region.names.get("fr"), Some("Région 1"));
                assert!(region.suggestions.contains("Gebiet 1 Deutschland"));
            }
            other => panic!("expected a region, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_geo_shards_cover_every_key_once() {
        let source = Arc::new(source());
        let (sender, receiver) = async_channel::unbounded();
        let fetcher = Fetcher::new(source, sender, Progress::new(), 2);
        let countries = Arc::new(LocaleCache::default());

        for shard in ShardSpec::all(3).unwrap() {
            fetcher.geo_shard(shard, Arc::clone(&countries)).await.unwrap();
        }
        drop(fetcher);

        let mut ids = Vec::new();
        while let Ok(document) = receiver.recv().await {
            ids.push(document.id());
        }
        ids.sort_unstable();

        let mut expected: Vec<u64> = vec![1, 2, 3];
        expected.extend(10..20);
        assert_eq!(ids, expected);
    }
}
