//! Draft Service - lifecycle of the account's character draft
//!
//! Fetching, creating, patching and deleting drafts, plus the two ways a
//! draft leaves the wizard: submission for review and the staff-only
//! add-to-roster shortcut.

use std::sync::Arc;

use chargen_domain::{DomainError, Draft, DraftId, DraftPatch, RosterId};
use chargen_shared::{
    routes, AddToRosterRequest, CgPointsBreakdownData, CreateDraftRequest, DraftApplicationData,
    RosterEntryData, SubmitDraftRequest,
};

use crate::application::api::Api;
use crate::application::error::ServiceError;
use crate::application::query::{fetch_cached, fetch_cached_list, invalidate_draft_queries};
use crate::infrastructure::QueryCache;
use crate::ports::outbound::ApiPort;

#[derive(Clone)]
pub struct DraftService {
    api: Api,
    cache: Arc<QueryCache>,
}

impl DraftService {
    pub fn new(api: Api, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    /// The account's draft, if it has one.
    pub async fn get_my_draft(&self) -> Result<Option<Draft>, ServiceError> {
        let drafts: Vec<Draft> =
            fetch_cached_list(&self.api, &self.cache, &routes::drafts()).await?;
        Ok(drafts.into_iter().next())
    }

    pub async fn create_draft(&self) -> Result<Draft, ServiceError> {
        let draft: Draft = self
            .api
            .post(&routes::drafts(), &CreateDraftRequest::default())
            .await?;
        self.cache.invalidate(&routes::drafts()).await;
        tracing::info!(draft = %draft.id, "Created draft");
        Ok(draft)
    }

    pub async fn get_draft(&self, id: DraftId) -> Result<Draft, ServiceError> {
        fetch_cached(&self.api, &self.cache, &routes::draft(id)).await
    }

    /// Send a patch body as is and return the stored draft.
    ///
    /// The response becomes the cached copy; everything else scoped to the
    /// draft (points breakdown, application) is dropped.
    pub async fn patch_draft(&self, id: DraftId, body: &DraftPatch) -> Result<Draft, ServiceError> {
        let saved: Draft = self.api.patch(&routes::draft(id), body).await?;
        invalidate_draft_queries(&self.cache, id).await;
        let cached = serde_json::to_value(&saved).map_err(DomainError::from)?;
        self.cache.insert(routes::draft(id), cached).await;
        Ok(saved)
    }

    /// Throw the draft away so the account can start over.
    pub async fn delete_draft(&self, id: DraftId) -> Result<(), ServiceError> {
        self.api.delete(&routes::draft(id)).await?;
        invalidate_draft_queries(&self.cache, id).await;
        tracing::info!(draft = %id, "Deleted draft");
        Ok(())
    }

    /// Submit the draft for staff review.
    pub async fn submit(
        &self,
        id: DraftId,
        submission_notes: impl Into<String>,
    ) -> Result<DraftApplicationData, ServiceError> {
        let request = SubmitDraftRequest {
            submission_notes: submission_notes.into(),
        };
        let application: DraftApplicationData =
            self.api.post(&routes::draft_submit(id), &request).await?;
        invalidate_draft_queries(&self.cache, id).await;
        tracing::info!(draft = %id, application = %application.id, "Submitted draft");
        Ok(application)
    }

    /// Staff only: finalize the draft straight onto a roster.
    pub async fn add_to_roster(
        &self,
        id: DraftId,
        roster: RosterId,
    ) -> Result<RosterEntryData, ServiceError> {
        let entry: RosterEntryData = self
            .api
            .post(&routes::draft_add_to_roster(id), &AddToRosterRequest { roster })
            .await?;
        invalidate_draft_queries(&self.cache, id).await;
        tracing::info!(draft = %id, character = entry.character_id, "Added draft to roster");
        Ok(entry)
    }

    pub async fn cg_points(&self, id: DraftId) -> Result<CgPointsBreakdownData, ServiceError> {
        fetch_cached(&self.api, &self.cache, &routes::draft_cg_points(id)).await
    }
}
