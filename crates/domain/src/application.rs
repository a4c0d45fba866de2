//! Staff review workflow for submitted drafts
//!
//! Every transition is decided by the backend. The client only needs to know
//! which status it is looking at, how to label it, and which actions to offer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a draft application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    InReview,
    RevisionsRequested,
    Approved,
    Denied,
    Withdrawn,
}

/// Badge styling for a status pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Warning,
    Success,
    Destructive,
    Outline,
}

impl BadgeVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeVariant::Default => "default",
            BadgeVariant::Secondary => "secondary",
            BadgeVariant::Warning => "warning",
            BadgeVariant::Success => "success",
            BadgeVariant::Destructive => "destructive",
            BadgeVariant::Outline => "outline",
        }
    }
}

impl ApplicationStatus {
    pub fn all() -> &'static [ApplicationStatus] {
        &[
            ApplicationStatus::Submitted,
            ApplicationStatus::InReview,
            ApplicationStatus::RevisionsRequested,
            ApplicationStatus::Approved,
            ApplicationStatus::Denied,
            ApplicationStatus::Withdrawn,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Submitted",
            ApplicationStatus::InReview => "In Review",
            ApplicationStatus::RevisionsRequested => "Revisions Requested",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Denied => "Denied",
            ApplicationStatus::Withdrawn => "Withdrawn",
        }
    }

    pub fn badge_variant(self) -> BadgeVariant {
        match self {
            ApplicationStatus::Submitted => BadgeVariant::Secondary,
            ApplicationStatus::InReview => BadgeVariant::Default,
            ApplicationStatus::RevisionsRequested => BadgeVariant::Warning,
            ApplicationStatus::Approved => BadgeVariant::Success,
            ApplicationStatus::Denied => BadgeVariant::Destructive,
            ApplicationStatus::Withdrawn => BadgeVariant::Outline,
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Read model that decides which workflow actions are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationPhase {
    /// Draft has never been submitted (or was unsubmitted)
    NoApplication,
    /// Waiting on staff: submitted or in review
    Pending(ApplicationStatus),
    /// Staff asked for changes
    RevisionsRequested,
    /// Denied or withdrawn
    Closed(ApplicationStatus),
    /// Approved; the draft becomes a character
    Approved,
}

/// Actions the player may take on the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplicationActions {
    pub submit: bool,
    pub unsubmit: bool,
    pub withdraw: bool,
    pub resubmit: bool,
    pub edit_draft: bool,
    pub comment: bool,
}

impl ApplicationPhase {
    pub fn from_status(status: Option<ApplicationStatus>) -> Self {
        match status {
            None => ApplicationPhase::NoApplication,
            Some(s @ (ApplicationStatus::Submitted | ApplicationStatus::InReview)) => {
                ApplicationPhase::Pending(s)
            }
            Some(ApplicationStatus::RevisionsRequested) => ApplicationPhase::RevisionsRequested,
            Some(s @ (ApplicationStatus::Denied | ApplicationStatus::Withdrawn)) => {
                ApplicationPhase::Closed(s)
            }
            Some(ApplicationStatus::Approved) => ApplicationPhase::Approved,
        }
    }

    pub fn actions(self) -> ApplicationActions {
        match self {
            ApplicationPhase::NoApplication => ApplicationActions {
                submit: true,
                edit_draft: true,
                ..Default::default()
            },
            ApplicationPhase::Pending(ApplicationStatus::Submitted) => ApplicationActions {
                unsubmit: true,
                withdraw: true,
                comment: true,
                ..Default::default()
            },
            // Once staff pick it up, the player can only withdraw or talk.
            ApplicationPhase::Pending(_) => ApplicationActions {
                withdraw: true,
                comment: true,
                ..Default::default()
            },
            ApplicationPhase::RevisionsRequested => ApplicationActions {
                resubmit: true,
                withdraw: true,
                edit_draft: true,
                comment: true,
                ..Default::default()
            },
            ApplicationPhase::Closed(_) | ApplicationPhase::Approved => {
                ApplicationActions::default()
            }
        }
    }

    /// The underlying status, if an application exists.
    pub fn status(self) -> Option<ApplicationStatus> {
        match self {
            ApplicationPhase::NoApplication => None,
            ApplicationPhase::Pending(s) | ApplicationPhase::Closed(s) => Some(s),
            ApplicationPhase::RevisionsRequested => Some(ApplicationStatus::RevisionsRequested),
            ApplicationPhase::Approved => Some(ApplicationStatus::Approved),
        }
    }

    /// Whether the draft's stages are locked for editing.
    pub fn is_locked(self) -> bool {
        !self.actions().edit_draft
    }
}
