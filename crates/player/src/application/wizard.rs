//! Wizard controller
//!
//! Moves the player between stages. Unsaved edits are saved before leaving a
//! stage; when that fails the player decides whether to throw them away or
//! stay put.

use std::collections::BTreeMap;
use std::sync::Arc;

use chargen_domain::{derive_completion, Draft, DraftPatch, Stage};

use crate::application::boundary::{Recovery, StageBoundary, StageFault};
use crate::application::draft_store::DraftStore;
use crate::application::error::{ServiceError, SAVE_FAILED_PROMPT};
use crate::ports::outbound::ConfirmPort;

pub struct Wizard {
    store: DraftStore,
    confirm: Arc<dyn ConfirmPort>,
    boundary: StageBoundary,
}

impl Wizard {
    pub fn new(store: DraftStore, confirm: Arc<dyn ConfirmPort>) -> Self {
        Self {
            store,
            confirm,
            boundary: StageBoundary::new(),
        }
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut DraftStore {
        &mut self.store
    }

    pub fn draft(&self) -> &Draft {
        self.store.snapshot()
    }

    pub fn current_stage(&self) -> Stage {
        self.store.current_stage()
    }

    /// Derived completion of every stage, staged edits included.
    pub fn checklist(&self) -> Result<BTreeMap<Stage, bool>, ServiceError> {
        Ok(derive_completion(&self.store.view()?))
    }

    /// Move to `to`, saving staged edits first.
    pub async fn navigate(&mut self, to: Stage) -> Result<Stage, ServiceError> {
        let from = self.current_stage();
        if let Err(err) = self.store.flush().await {
            tracing::warn!(%from, %to, error = %err, "Could not save before navigating");
            if !self.confirm.confirm(SAVE_FAILED_PROMPT).await {
                return Err(ServiceError::NavigationBlocked(to));
            }
            self.store.discard_pending();
        }

        if from != to {
            self.store.update(DraftPatch::new().stage(to)).await?;
            tracing::info!(%from, %to, "Changed stage");
        }
        self.boundary.clear(to);
        Ok(to)
    }

    pub async fn next(&mut self) -> Result<Stage, ServiceError> {
        match self.current_stage().next() {
            Some(stage) => self.navigate(stage).await,
            None => Ok(self.current_stage()),
        }
    }

    pub async fn previous(&mut self) -> Result<Stage, ServiceError> {
        match self.current_stage().previous() {
            Some(stage) => self.navigate(stage).await,
            None => Ok(self.current_stage()),
        }
    }

    /// Record a failure inside the current stage.
    pub fn report_fault(&mut self, err: &ServiceError) -> &StageFault {
        let stage = self.current_stage();
        self.boundary.record(stage, err)
    }

    pub fn fault(&self) -> Option<&StageFault> {
        self.boundary.fault(self.current_stage())
    }

    pub fn recovery_options(&self) -> Vec<Recovery> {
        StageBoundary::recovery_options(self.current_stage())
    }

    /// Leave a faulted stage the way the player chose.
    pub async fn recover(&mut self, recovery: Recovery) -> Result<Stage, ServiceError> {
        let stage = self.current_stage();
        match self.boundary.resolve(stage, recovery) {
            Some(target) if target != stage => self.navigate(target).await,
            _ => Ok(stage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::api::Api;
    use crate::application::services::DraftService;
    use crate::infrastructure::QueryCache;
    use crate::ports::outbound::{ApiError, MockConfirmPort, MockRawApiPort};
    use chargen_domain::{AreaId, DraftId};
    use serde_json::{json, Value};
    use std::time::Duration;

    fn wizard(raw: MockRawApiPort, confirm: MockConfirmPort) -> Wizard {
        let drafts = DraftService::new(
            Api::new(Arc::new(raw)),
            Arc::new(QueryCache::new(Duration::from_secs(60))),
        );
        let mut draft = Draft::new(DraftId::new(8));
        draft.current_stage = Stage::Origin;
        Wizard::new(DraftStore::new(drafts, draft), Arc::new(confirm))
    }

    fn stage_response(body: &Value) -> Value {
        let stage = body["current_stage"].clone();
        json!({"id": 8, "current_stage": stage})
    }

    #[tokio::test]
    async fn navigation_saves_stage() {
        let mut raw = MockRawApiPort::new();
        raw.expect_patch_json()
            .withf(|_, body| body == &json!({"current_stage": 2}))
            .times(1)
            .returning(|_, body| Ok(stage_response(body)));
        let mut confirm = MockConfirmPort::new();
        confirm.expect_confirm().never();
        let mut wizard = wizard(raw, confirm);

        assert_eq!(wizard.next().await.unwrap(), Stage::Heritage);
        assert_eq!(wizard.current_stage(), Stage::Heritage);
    }

    #[tokio::test]
    async fn previous_stops_at_first_stage() {
        let mut raw = MockRawApiPort::new();
        raw.expect_patch_json().never();
        let mut wizard = wizard(raw, MockConfirmPort::new());
        assert_eq!(wizard.previous().await.unwrap(), Stage::Origin);
    }

    #[tokio::test]
    async fn declined_discard_blocks_navigation() {
        let mut raw = MockRawApiPort::new();
        raw.expect_patch_json()
            .times(1)
            .returning(|_, _| Err(ApiError::http(500, "boom")));
        let mut confirm = MockConfirmPort::new();
        confirm
            .expect_confirm()
            .withf(|message| message == SAVE_FAILED_PROMPT)
            .times(1)
            .return_const(false);
        let mut wizard = wizard(raw, confirm);
        wizard
            .store_mut()
            .stage_edit(DraftPatch::new().area(Some(AreaId::new(3))))
            .unwrap();

        let err = wizard.navigate(Stage::Path).await.unwrap_err();
        assert_eq!(err, ServiceError::NavigationBlocked(Stage::Path));
        assert_eq!(wizard.current_stage(), Stage::Origin);
        assert!(wizard.store().has_pending());
    }

    #[tokio::test]
    async fn accepted_discard_moves_on() {
        let mut raw = MockRawApiPort::new();
        let mut calls = 0;
        raw.expect_patch_json().times(2).returning(move |_, body| {
            calls += 1;
            if calls == 1 {
                Err(ApiError::RequestFailed("offline".into()))
            } else {
                Ok(stage_response(body))
            }
        });
        let mut confirm = MockConfirmPort::new();
        confirm.expect_confirm().times(1).return_const(true);
        let mut wizard = wizard(raw, confirm);
        wizard
            .store_mut()
            .stage_edit(DraftPatch::new().area(Some(AreaId::new(3))))
            .unwrap();

        assert_eq!(wizard.navigate(Stage::Path).await.unwrap(), Stage::Path);
        assert!(!wizard.store().has_pending());
        assert_eq!(wizard.draft().selected_area, None);
    }

    #[tokio::test]
    async fn recovery_leaves_faulted_stage() {
        let mut raw = MockRawApiPort::new();
        raw.expect_patch_json()
            .returning(|_, body| Ok(stage_response(body)));
        let mut wizard = wizard(raw, MockConfirmPort::new());
        wizard.navigate(Stage::Magic).await.unwrap();

        wizard.report_fault(&ServiceError::from(ApiError::http(502, "bad gateway")));
        assert!(wizard.fault().is_some());
        assert_eq!(wizard.recovery_options().len(), 3);

        assert_eq!(
            wizard.recover(Recovery::PreviousStage).await.unwrap(),
            Stage::Attributes
        );
        assert!(wizard.fault().is_none());

        wizard.report_fault(&ServiceError::NoDraft);
        assert_eq!(wizard.recover(Recovery::Retry).await.unwrap(), Stage::Attributes);
        assert!(wizard.fault().is_none());
    }

    #[test]
    fn checklist_includes_staged_edits() {
        let mut wizard = wizard(MockRawApiPort::new(), MockConfirmPort::new());
        wizard
            .store_mut()
            .stage_edit(DraftPatch::new().area(Some(AreaId::new(1))))
            .unwrap();

        let checklist = wizard.checklist().unwrap();
        assert_eq!(checklist.get(&Stage::Origin), Some(&true));
        assert_eq!(checklist.get(&Stage::Review), Some(&false));
    }
}
