//! Magic Service - per-draft magic records
//!
//! Gifts and facet assignments are separate collections filtered by draft;
//! the motif and anima ritual hang off the draft itself.

use std::sync::Arc;

use chargen_domain::{
    project_resonances, DraftGiftId, DraftId, FacetAssignmentId, FacetId, GiftId, ResonanceId,
    ResonanceProjection, TechniqueId,
};
use chargen_shared::{
    resonance_contributions, routes, AnimaRitualData, CreateDraftGiftRequest,
    CreateFacetAssignmentRequest, DraftGiftData, FacetAssignmentData, MotifData,
    UpdateAnimaRitualRequest, UpdateMotifRequest,
};

use crate::application::api::Api;
use crate::application::error::ServiceError;
use crate::application::query::{
    fetch_cached_list, fetch_cached_optional, invalidate_draft_queries,
};
use crate::infrastructure::QueryCache;
use crate::ports::outbound::ApiPort;

#[derive(Clone)]
pub struct MagicService {
    api: Api,
    cache: Arc<QueryCache>,
}

impl MagicService {
    pub fn new(api: Api, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub async fn gifts(&self, draft: DraftId) -> Result<Vec<DraftGiftData>, ServiceError> {
        fetch_cached_list(&self.api, &self.cache, &routes::draft_gifts(draft)).await
    }

    pub async fn add_gift(
        &self,
        draft: DraftId,
        gift: GiftId,
        techniques: Vec<TechniqueId>,
    ) -> Result<DraftGiftData, ServiceError> {
        let request = CreateDraftGiftRequest {
            draft,
            gift,
            techniques,
        };
        let created: DraftGiftData = self
            .api
            .post(&routes::draft_gifts_collection(), &request)
            .await?;
        self.invalidate(draft).await;
        tracing::debug!(%draft, %gift, "Added gift to draft");
        Ok(created)
    }

    pub async fn remove_gift(&self, draft: DraftId, id: DraftGiftId) -> Result<(), ServiceError> {
        self.api.delete(&routes::draft_gift(id)).await?;
        self.invalidate(draft).await;
        Ok(())
    }

    /// The draft's motif, or `None` before one is written.
    pub async fn motif(&self, draft: DraftId) -> Result<Option<MotifData>, ServiceError> {
        fetch_cached_optional(&self.api, &self.cache, &routes::draft_motif(draft)).await
    }

    pub async fn update_motif(
        &self,
        draft: DraftId,
        request: &UpdateMotifRequest,
    ) -> Result<MotifData, ServiceError> {
        let motif: MotifData = self.api.patch(&routes::draft_motif(draft), request).await?;
        self.invalidate(draft).await;
        Ok(motif)
    }

    pub async fn anima_ritual(
        &self,
        draft: DraftId,
    ) -> Result<Option<AnimaRitualData>, ServiceError> {
        fetch_cached_optional(&self.api, &self.cache, &routes::draft_anima_ritual(draft)).await
    }

    pub async fn update_anima_ritual(
        &self,
        draft: DraftId,
        request: &UpdateAnimaRitualRequest,
    ) -> Result<AnimaRitualData, ServiceError> {
        let ritual: AnimaRitualData = self
            .api
            .patch(&routes::draft_anima_ritual(draft), request)
            .await?;
        self.invalidate(draft).await;
        Ok(ritual)
    }

    pub async fn facet_assignments(
        &self,
        draft: DraftId,
    ) -> Result<Vec<FacetAssignmentData>, ServiceError> {
        fetch_cached_list(&self.api, &self.cache, &routes::facet_assignments(draft)).await
    }

    pub async fn add_facet_assignment(
        &self,
        draft: DraftId,
        facet: FacetId,
        resonance: Option<ResonanceId>,
    ) -> Result<FacetAssignmentData, ServiceError> {
        let request = CreateFacetAssignmentRequest {
            draft,
            facet,
            resonance,
        };
        let created: FacetAssignmentData = self
            .api
            .post(&routes::facet_assignments_collection(), &request)
            .await?;
        self.invalidate(draft).await;
        Ok(created)
    }

    pub async fn remove_facet_assignment(
        &self,
        draft: DraftId,
        id: FacetAssignmentId,
    ) -> Result<(), ServiceError> {
        self.api.delete(&routes::facet_assignment(id)).await?;
        self.invalidate(draft).await;
        Ok(())
    }

    /// Resonance totals across gifts, motif and anima ritual.
    pub async fn resonance_projection(
        &self,
        draft: DraftId,
    ) -> Result<Vec<ResonanceProjection>, ServiceError> {
        let (gifts, motif, ritual) = tokio::try_join!(
            self.gifts(draft),
            self.motif(draft),
            self.anima_ritual(draft),
        )?;
        let contributions = resonance_contributions(&gifts, motif.as_ref(), ritual.as_ref());
        Ok(project_resonances(&contributions))
    }

    async fn invalidate(&self, draft: DraftId) {
        self.cache.invalidate(&routes::draft_gifts(draft)).await;
        self.cache.invalidate(&routes::facet_assignments(draft)).await;
        invalidate_draft_queries(&self.cache, draft).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockRawApiPort;
    use chargen_domain::StatName;
    use serde_json::json;
    use std::time::Duration;

    fn service(raw: MockRawApiPort) -> MagicService {
        MagicService::new(
            Api::new(Arc::new(raw)),
            Arc::new(QueryCache::new(Duration::from_secs(60))),
        )
    }

    #[tokio::test]
    async fn adding_a_gift_refreshes_the_list() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .withf(|path| path == "/api/character-creation/draft-gifts/?draft=3")
            .times(2)
            .returning(|_| Ok(json!([])));
        raw.expect_post_json()
            .withf(|path, body| {
                path == "/api/character-creation/draft-gifts/"
                    && body == &json!({"draft": 3, "gift": 8, "techniques": [21]})
            })
            .returning(|_, _| Ok(json!({"id": 1, "draft": 3, "gift": 8, "techniques": [21]})));
        let service = service(raw);
        let draft = DraftId::new(3);

        assert!(service.gifts(draft).await.unwrap().is_empty());
        let created = service
            .add_gift(draft, GiftId::new(8), vec![TechniqueId::new(21)])
            .await
            .unwrap();
        assert_eq!(created.techniques, vec![TechniqueId::new(21)]);
        service.gifts(draft).await.unwrap();
    }

    #[tokio::test]
    async fn missing_motif_is_none() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_optional_json()
            .withf(|path| path == "/api/character-creation/drafts/3/motif/")
            .returning(|_| Ok(None));
        assert!(service(raw).motif(DraftId::new(3)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ritual_update_sends_only_set_fields() {
        let mut raw = MockRawApiPort::new();
        raw.expect_patch_json()
            .withf(|path, body| {
                path == "/api/character-creation/drafts/3/anima-ritual/"
                    && body == &json!({"stat": "wits"})
            })
            .returning(|_, _| Ok(json!({"stat": "wits"})));

        let request = UpdateAnimaRitualRequest {
            stat: Some(StatName::Wits),
            ..Default::default()
        };
        let ritual = service(raw)
            .update_anima_ritual(DraftId::new(3), &request)
            .await
            .unwrap();
        assert_eq!(ritual.stat, Some(StatName::Wits));
    }

    #[tokio::test]
    async fn projection_combines_all_sources() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json().returning(|_| {
            Ok(json!([{
                "id": 1, "draft": 3, "gift": 8,
                "resonances": [{"resonance": 5, "resonance_name": "Ash", "strength": 2}]
            }]))
        });
        raw.expect_get_optional_json().returning(|path| {
            if path.ends_with("/motif/") {
                Ok(Some(json!({
                    "resonances": [{"resonance": 6, "resonance_name": "Brine", "strength": 3}]
                })))
            } else {
                Ok(Some(json!({
                    "resonance": {"resonance": 5, "resonance_name": "Ash", "strength": 2}
                })))
            }
        });

        let projection = service(raw)
            .resonance_projection(DraftId::new(3))
            .await
            .unwrap();
        let totals: Vec<_> = projection
            .iter()
            .map(|p| (p.resonance_name.as_str(), p.total))
            .collect();
        assert_eq!(totals, vec![("Ash", 4), ("Brine", 3)]);
    }
}
