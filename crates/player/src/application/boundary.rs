//! Per-stage error boundary
//!
//! A failure while a stage is showing is recorded against that stage only.
//! The player sees the generic error message and a short list of ways out;
//! every other stage keeps working.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use chargen_domain::Stage;

use crate::application::error::{ServiceError, GENERIC_ERROR_MESSAGE};

#[derive(Debug, Clone, PartialEq)]
pub struct StageFault {
    pub stage: Stage,
    /// Underlying error, for logs only
    pub detail: String,
}

impl StageFault {
    pub fn message(&self) -> &'static str {
        GENERIC_ERROR_MESSAGE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Remount the faulted stage
    Retry,
    PreviousStage,
    FirstStage,
}

impl Recovery {
    pub fn label(self) -> &'static str {
        match self {
            Recovery::Retry => "Try Again",
            Recovery::PreviousStage => "Previous Stage",
            Recovery::FirstStage => "Start Over",
        }
    }
}

#[derive(Debug, Default)]
pub struct StageBoundary {
    faults: BTreeMap<Stage, StageFault>,
}

impl StageBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stage: Stage, err: &ServiceError) -> &StageFault {
        tracing::error!(%stage, error = %err, "Stage failed");
        let fault = StageFault {
            stage,
            detail: err.to_string(),
        };
        match self.faults.entry(stage) {
            Entry::Occupied(mut slot) => {
                slot.insert(fault);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(fault),
        }
    }

    pub fn fault(&self, stage: Stage) -> Option<&StageFault> {
        self.faults.get(&stage)
    }

    pub fn clear(&mut self, stage: Stage) {
        self.faults.remove(&stage);
    }

    /// Ways out of a faulted stage. The first stage has nowhere to go back to.
    pub fn recovery_options(stage: Stage) -> Vec<Recovery> {
        let mut options = vec![Recovery::Retry];
        if stage.previous().is_some() {
            options.push(Recovery::PreviousStage);
        }
        if stage != Stage::first() {
            options.push(Recovery::FirstStage);
        }
        options
    }

    /// Clear the fault and return the stage to show next.
    ///
    /// `None` when the recovery is not offered for this stage; the fault is
    /// kept in that case.
    pub fn resolve(&mut self, stage: Stage, recovery: Recovery) -> Option<Stage> {
        let target = match recovery {
            Recovery::Retry => Some(stage),
            Recovery::PreviousStage => stage.previous(),
            Recovery::FirstStage => (stage != Stage::first()).then(Stage::first),
        }?;
        self.clear(stage);
        Some(target)
    }
}
