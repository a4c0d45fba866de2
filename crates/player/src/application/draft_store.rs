//! Draft reconciler
//!
//! Keeps the authoritative draft snapshot for the wizard. Edits are applied
//! to the snapshot optimistically, sent as one PATCH whose `draft_data` is the
//! full merged bag, and replaced by the server's answer. A failed save puts
//! the previous snapshot back.
//!
//! Edits may also be staged without saving; staged patches merge
//! last-write-wins and go out together on the next save or flush.

use chargen_domain::{completion_patch, ApplicationPhase, Draft, DraftPatch, Stage};

use crate::application::error::ServiceError;
use crate::application::services::DraftService;

pub struct DraftStore {
    drafts: DraftService,
    snapshot: Draft,
    pending: DraftPatch,
    phase: ApplicationPhase,
}

impl DraftStore {
    pub fn new(drafts: DraftService, snapshot: Draft) -> Self {
        Self {
            drafts,
            snapshot,
            pending: DraftPatch::new(),
            phase: ApplicationPhase::NoApplication,
        }
    }

    pub fn with_phase(mut self, phase: ApplicationPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn set_phase(&mut self, phase: ApplicationPhase) {
        self.phase = phase;
    }

    pub fn phase(&self) -> ApplicationPhase {
        self.phase
    }

    /// Last saved draft.
    pub fn snapshot(&self) -> &Draft {
        &self.snapshot
    }

    pub fn current_stage(&self) -> Stage {
        self.snapshot.current_stage
    }

    /// Saved draft with staged edits applied on top.
    pub fn view(&self) -> Result<Draft, ServiceError> {
        Ok(self.snapshot.apply_patch(&self.pending)?)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Stage an edit without saving it.
    pub fn stage_edit(&mut self, patch: DraftPatch) -> Result<(), ServiceError> {
        self.ensure_editable(&patch)?;
        let pending = std::mem::take(&mut self.pending);
        self.pending = pending.merge(patch);
        Ok(())
    }

    pub fn discard_pending(&mut self) {
        if self.has_pending() {
            tracing::info!(draft = %self.snapshot.id, "Discarding unsaved edits");
        }
        self.pending = DraftPatch::new();
    }

    /// Save `patch` together with any staged edits.
    pub async fn update(&mut self, patch: DraftPatch) -> Result<&Draft, ServiceError> {
        self.ensure_editable(&patch)?;
        let pending = std::mem::take(&mut self.pending);
        let combined = pending.clone().merge(patch);
        if let Err(err) = self.save(combined).await {
            self.pending = pending;
            return Err(err);
        }
        Ok(&self.snapshot)
    }

    /// Save staged edits, if any.
    pub async fn flush(&mut self) -> Result<(), ServiceError> {
        if !self.has_pending() {
            return Ok(());
        }
        self.update(DraftPatch::new()).await.map(|_| ())
    }

    /// Push derived stage completion if the stored flags disagree.
    ///
    /// Returns whether a request was sent. Locked drafts are left alone.
    pub async fn sync_completion(&mut self) -> Result<bool, ServiceError> {
        if self.phase.is_locked() {
            return Ok(false);
        }
        match completion_patch(&self.snapshot) {
            Some(patch) => {
                self.save(patch).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn save(&mut self, patch: DraftPatch) -> Result<(), ServiceError> {
        if patch.is_empty() {
            return Ok(());
        }

        let optimistic = self.snapshot.apply_patch(&patch)?;
        let patch = match completion_patch(&optimistic) {
            Some(completion) if !self.phase.is_locked() => patch.merge(completion),
            _ => patch,
        };
        let body = patch.expand_against(&self.snapshot)?;
        let optimistic = self.snapshot.apply_patch(&patch)?;
        let previous = std::mem::replace(&mut self.snapshot, optimistic);

        tracing::debug!(draft = %previous.id, "Saving draft");
        match self.drafts.patch_draft(previous.id, &body).await {
            Ok(saved) => {
                self.snapshot = saved;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(draft = %previous.id, error = %err, "Draft save failed, rolling back");
                self.snapshot = previous;
                Err(err)
            }
        }
    }

    /// Anything beyond moving between stages needs an editable draft.
    fn ensure_editable(&self, patch: &DraftPatch) -> Result<(), ServiceError> {
        if !self.phase.is_locked() {
            return Ok(());
        }
        let edits = DraftPatch {
            current_stage: None,
            ..patch.clone()
        };
        if edits.is_empty() {
            return Ok(());
        }
        let status = self
            .phase
            .status()
            .map(|status| status.label())
            .unwrap_or("locked");
        Err(ServiceError::DraftLocked(status.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::api::Api;
    use crate::infrastructure::QueryCache;
    use crate::ports::outbound::{ApiError, MockRawApiPort};
    use chargen_domain::{ApplicationStatus, AreaId, DraftDataPatch, HeritageId, PathId};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn initial_draft() -> Draft {
        serde_json::from_value(json!({
            "id": 5,
            "current_stage": 1,
            "draft_data": {"first_name": "Ariadne", "stats": {"strength": 30}},
            "stage_completion": {}
        }))
        .unwrap()
    }

    fn store(raw: MockRawApiPort) -> DraftStore {
        let drafts = DraftService::new(
            Api::new(Arc::new(raw)),
            Arc::new(QueryCache::new(Duration::from_secs(60))),
        );
        DraftStore::new(drafts, initial_draft())
    }

    /// Backend double that stores whatever it is sent.
    fn echoing_backend(bodies: Arc<Mutex<Vec<Value>>>) -> MockRawApiPort {
        let mut raw = MockRawApiPort::new();
        raw.expect_patch_json().returning(move |_, body| {
            bodies.lock().unwrap().push(body.clone());
            let mut draft = serde_json::to_value(initial_draft()).unwrap();
            for (key, value) in body.as_object().unwrap() {
                draft[key.as_str()] = value.clone();
            }
            Ok(draft)
        });
        raw
    }

    #[tokio::test]
    async fn update_sends_merged_bag_and_adopts_response() {
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let mut store = store(echoing_backend(bodies.clone()));

        let patch = DraftPatch::new()
            .area(Some(AreaId::new(2)))
            .data(DraftDataPatch::new().text("personality", "Wry"));
        let saved = store.update(patch).await.unwrap().clone();

        let sent = bodies.lock().unwrap()[0].clone();
        assert_eq!(sent["selected_area"], json!(2));
        assert_eq!(sent["draft_data"]["first_name"], json!("Ariadne"));
        assert_eq!(sent["draft_data"]["personality"], json!("Wry"));
        assert_eq!(sent["draft_data"]["stats"], json!({"strength": 30}));
        // Origin became complete with the area pick.
        assert_eq!(sent["stage_completion"]["1"], json!(true));

        assert_eq!(saved.selected_area, Some(AreaId::new(2)));
        assert!(saved.is_stage_marked_complete(Stage::Origin));
        assert_eq!(store.snapshot(), &saved);
    }

    #[tokio::test]
    async fn failed_update_rolls_back() {
        let mut raw = MockRawApiPort::new();
        raw.expect_patch_json()
            .returning(|_, _| Err(ApiError::http(500, "boom")));
        let mut store = store(raw);

        let err = store
            .update(DraftPatch::new().path(Some(PathId::new(3))))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Api(_)));
        assert_eq!(store.snapshot(), &initial_draft());
    }

    #[tokio::test]
    async fn staged_edits_flush_as_one_request() {
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let mut store = store(echoing_backend(bodies.clone()));

        store
            .stage_edit(DraftPatch::new().data(DraftDataPatch::new().text("first_name", "Ada")))
            .unwrap();
        store
            .stage_edit(DraftPatch::new().data(DraftDataPatch::new().text("first_name", "Iris")))
            .unwrap();
        store
            .stage_edit(DraftPatch::new().heritage(Some(HeritageId::new(4))))
            .unwrap();
        assert!(store.has_pending());
        assert_eq!(
            store.view().unwrap().draft_data.identity.first_name.as_deref(),
            Some("Iris")
        );
        assert_eq!(store.snapshot(), &initial_draft());

        store.flush().await.unwrap();
        assert!(!store.has_pending());

        let bodies = bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["draft_data"]["first_name"], json!("Iris"));
        assert_eq!(bodies[0]["selected_heritage"], json!(4));
    }

    #[tokio::test]
    async fn failed_flush_keeps_staged_edits() {
        let mut raw = MockRawApiPort::new();
        raw.expect_patch_json()
            .times(1)
            .returning(|_, _| Err(ApiError::RequestFailed("offline".into())));
        let mut store = store(raw);

        store
            .stage_edit(DraftPatch::new().area(Some(AreaId::new(1))))
            .unwrap();
        assert!(store.flush().await.is_err());
        assert!(store.has_pending());

        store.discard_pending();
        assert!(!store.has_pending());
        store.flush().await.unwrap();
    }

    #[tokio::test]
    async fn locked_draft_only_allows_navigation() {
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let mut store = store(echoing_backend(bodies.clone()))
            .with_phase(ApplicationPhase::Pending(ApplicationStatus::InReview));

        let err = store
            .stage_edit(DraftPatch::new().area(Some(AreaId::new(1))))
            .unwrap_err();
        assert_eq!(err, ServiceError::DraftLocked("In Review".into()));

        store.update(DraftPatch::new().stage(Stage::Review)).await.unwrap();
        assert_eq!(store.current_stage(), Stage::Review);
        assert!(!store.sync_completion().await.unwrap());
        assert_eq!(bodies.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn completion_sync_is_skipped_when_in_step() {
        let bodies = Arc::new(Mutex::new(Vec::new()));
        let mut store = store(echoing_backend(bodies.clone()));

        // Every stored flag is missing and every derived flag is false.
        assert!(!store.sync_completion().await.unwrap());
        assert!(bodies.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn completion_sync_pushes_stale_flags() {
        let mut draft = initial_draft();
        draft.stage_completion.insert(Stage::Path, true);
        let mut raw = MockRawApiPort::new();
        raw.expect_patch_json()
            .withf(|_, body| body["stage_completion"]["5"] == json!(false))
            .times(1)
            .returning(|_, body| {
                let flags = body["stage_completion"].clone();
                Ok(json!({"id": 5, "stage_completion": flags}))
            });
        let drafts = DraftService::new(
            Api::new(Arc::new(raw)),
            Arc::new(QueryCache::new(Duration::from_secs(60))),
        );
        let mut store = DraftStore::new(drafts, draft);

        assert!(store.sync_completion().await.unwrap());
        assert!(!store.snapshot().is_stage_marked_complete(Stage::Path));
    }
}
