//! Application Service - review workflow for a submitted draft
//!
//! Staff move the application along on their own, so its status is always
//! read from the backend, never from the cache. Every player action is a
//! remote call followed by invalidation of the draft's cached queries.

use std::sync::Arc;

use serde_json::json;

use chargen_domain::{ApplicationActions, ApplicationPhase, DraftId};
use chargen_shared::{
    routes, AddCommentRequest, ApplicationCommentData, DraftApplicationData, ResubmitRequest,
};

use crate::application::api::Api;
use crate::application::error::ServiceError;
use crate::application::query::invalidate_draft_queries;
use crate::infrastructure::QueryCache;
use crate::ports::outbound::ApiPort;

#[derive(Clone)]
pub struct ApplicationService {
    api: Api,
    cache: Arc<QueryCache>,
}

impl ApplicationService {
    pub fn new(api: Api, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    /// The draft's application, or `None` if it was never submitted.
    pub async fn get_application(
        &self,
        draft: DraftId,
    ) -> Result<Option<DraftApplicationData>, ServiceError> {
        Ok(self
            .api
            .get_optional::<DraftApplicationData>(&routes::draft_application(draft))
            .await?)
    }

    pub async fn phase(&self, draft: DraftId) -> Result<ApplicationPhase, ServiceError> {
        Ok(self
            .get_application(draft)
            .await?
            .map(|application| application.phase())
            .unwrap_or(ApplicationPhase::NoApplication))
    }

    pub async fn available_actions(
        &self,
        draft: DraftId,
    ) -> Result<ApplicationActions, ServiceError> {
        Ok(self.phase(draft).await?.actions())
    }

    /// Pull a submission back before staff pick it up.
    pub async fn unsubmit(&self, draft: DraftId) -> Result<(), ServiceError> {
        self.api
            .post_no_response(&routes::draft_unsubmit(draft), &json!({}))
            .await?;
        self.after_action(draft, "unsubmit").await;
        Ok(())
    }

    pub async fn withdraw(&self, draft: DraftId) -> Result<(), ServiceError> {
        self.api
            .post_no_response(&routes::draft_withdraw(draft), &json!({}))
            .await?;
        self.after_action(draft, "withdraw").await;
        Ok(())
    }

    /// Send the revised draft back to staff, optionally with a note.
    pub async fn resubmit(
        &self,
        draft: DraftId,
        comment: impl Into<String>,
    ) -> Result<(), ServiceError> {
        let request = ResubmitRequest {
            comment: comment.into(),
        };
        self.api
            .post_no_response(&routes::draft_resubmit(draft), &request)
            .await?;
        self.after_action(draft, "resubmit").await;
        Ok(())
    }

    pub async fn add_comment(
        &self,
        draft: DraftId,
        text: impl Into<String>,
    ) -> Result<ApplicationCommentData, ServiceError> {
        let request = AddCommentRequest { text: text.into() };
        let comment: ApplicationCommentData = self
            .api
            .post(&routes::draft_application_comments(draft), &request)
            .await?;
        self.after_action(draft, "comment").await;
        Ok(comment)
    }

    async fn after_action(&self, draft: DraftId, action: &'static str) {
        invalidate_draft_queries(&self.cache, draft).await;
        tracing::info!(%draft, action, "Application action completed");
    }
}
