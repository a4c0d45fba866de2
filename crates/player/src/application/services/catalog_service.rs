//! Catalog Service - read-only choices offered by the wizard
//!
//! Every catalog is fetched once and served from the query cache until its
//! TTL runs out.

use std::sync::Arc;

use chargen_domain::{AreaId, GiftId, HeritageId};
use chargen_shared::{
    routes, AffinityData, BuildData, DistinctionCategoryData, DistinctionData, FacetData,
    FamilyData, GiftData, HeightBandData, HeritageData, PathData, ResonanceData,
    SpeciesOptionData, StartingAreaData, StatDefinitionData, TechniqueData, TraditionData,
};

use crate::application::api::Api;
use crate::application::error::ServiceError;
use crate::application::query::fetch_cached_list;
use crate::infrastructure::QueryCache;

/// Everything the magic stage needs in one fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MagicCatalog {
    pub affinities: Vec<AffinityData>,
    pub resonances: Vec<ResonanceData>,
    pub traditions: Vec<TraditionData>,
    pub gifts: Vec<GiftData>,
    pub facets: Vec<FacetData>,
}

#[derive(Clone)]
pub struct CatalogService {
    api: Api,
    cache: Arc<QueryCache>,
}

impl CatalogService {
    pub fn new(api: Api, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub async fn areas(&self) -> Result<Vec<StartingAreaData>, ServiceError> {
        fetch_cached_list(&self.api, &self.cache, &routes::areas()).await
    }

    pub async fn heritages(&self) -> Result<Vec<HeritageData>, ServiceError> {
        fetch_cached_list(&self.api, &self.cache, &routes::heritages()).await
    }

    pub async fn species_options(
        &self,
        heritage: HeritageId,
    ) -> Result<Vec<SpeciesOptionData>, ServiceError> {
        fetch_cached_list(&self.api, &self.cache, &routes::species_options(heritage)).await
    }

    pub async fn families(&self, area: AreaId) -> Result<Vec<FamilyData>, ServiceError> {
        fetch_cached_list(&self.api, &self.cache, &routes::families(area)).await
    }

    pub async fn paths(&self) -> Result<Vec<PathData>, ServiceError> {
        fetch_cached_list(&self.api, &self.cache, &routes::paths()).await
    }

    pub async fn distinction_categories(
        &self,
    ) -> Result<Vec<DistinctionCategoryData>, ServiceError> {
        let mut categories: Vec<DistinctionCategoryData> =
            fetch_cached_list(&self.api, &self.cache, &routes::distinction_categories()).await?;
        categories.sort_by_key(|category| category.display_order);
        Ok(categories)
    }

    pub async fn distinctions(
        &self,
        category_slug: &str,
    ) -> Result<Vec<DistinctionData>, ServiceError> {
        fetch_cached_list(&self.api, &self.cache, &routes::distinctions(category_slug)).await
    }

    pub async fn stat_definitions(&self) -> Result<Vec<StatDefinitionData>, ServiceError> {
        fetch_cached_list(&self.api, &self.cache, &routes::stat_definitions()).await
    }

    pub async fn magic(&self) -> Result<MagicCatalog, ServiceError> {
        let paths = [
            routes::affinities(),
            routes::resonances(),
            routes::traditions(),
            routes::gifts(),
            routes::facets(),
        ];
        let (affinities, resonances, traditions, gifts, facets) = tokio::try_join!(
            fetch_cached_list(&self.api, &self.cache, &paths[0]),
            fetch_cached_list(&self.api, &self.cache, &paths[1]),
            fetch_cached_list(&self.api, &self.cache, &paths[2]),
            fetch_cached_list(&self.api, &self.cache, &paths[3]),
            fetch_cached_list(&self.api, &self.cache, &paths[4]),
        )?;
        Ok(MagicCatalog {
            affinities,
            resonances,
            traditions,
            gifts,
            facets,
        })
    }

    pub async fn techniques(&self, gift: GiftId) -> Result<Vec<TechniqueData>, ServiceError> {
        fetch_cached_list(&self.api, &self.cache, &routes::techniques(gift)).await
    }

    pub async fn height_bands(&self) -> Result<Vec<HeightBandData>, ServiceError> {
        fetch_cached_list(&self.api, &self.cache, &routes::height_bands()).await
    }

    pub async fn builds(&self) -> Result<Vec<BuildData>, ServiceError> {
        fetch_cached_list(&self.api, &self.cache, &routes::builds()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{ApiError, MockRawApiPort};
    use serde_json::json;
    use std::time::Duration;

    fn service(raw: MockRawApiPort) -> CatalogService {
        CatalogService::new(
            Api::new(Arc::new(raw)),
            Arc::new(QueryCache::new(Duration::from_secs(60))),
        )
    }

    #[tokio::test]
    async fn catalog_is_fetched_once() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .withf(|path| path == "/api/character-creation/areas/")
            .times(1)
            .returning(|_| {
                Ok(json!([
                    {"id": 1, "name": "Arx", "realm_name": "Arx"},
                    {"id": 2, "name": "Luxen"}
                ]))
            });
        let service = service(raw);

        let first = service.areas().await.unwrap();
        let second = service.areas().await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn paginated_lists_are_unwrapped() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json().returning(|_| {
            Ok(json!({
                "count": 2, "next": null, "previous": null,
                "results": [
                    {"slug": "physical", "name": "Physical", "display_order": 2},
                    {"slug": "background", "name": "Background", "display_order": 1}
                ]
            }))
        });

        let categories = service(raw).distinction_categories().await.unwrap();
        assert_eq!(categories[0].slug, "background");
        assert_eq!(categories[1].slug, "physical");
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let mut raw = MockRawApiPort::new();
        let mut calls = 0;
        raw.expect_get_json().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(ApiError::http(503, "unavailable"))
            } else {
                Ok(json!([]))
            }
        });
        let service = service(raw);

        assert!(service.paths().await.is_err());
        assert!(service.paths().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn magic_catalog_fetches_every_list() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json().times(5).returning(|path| {
            if path.ends_with("/magic/gifts/") {
                Ok(json!([{"id": 1, "name": "Ember Tongue", "resonances": [3]}]))
            } else {
                Ok(json!([]))
            }
        });

        let service = service(raw);
        let magic = service.magic().await.unwrap();
        assert_eq!(magic.gifts.len(), 1);
        assert!(magic.traditions.is_empty());
        // Second read comes from the cache.
        assert_eq!(service.magic().await.unwrap(), magic);
    }
}
