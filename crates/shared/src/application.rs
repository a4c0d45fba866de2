//! Review workflow DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use chargen_domain::{ApplicationId, ApplicationPhase, ApplicationStatus, CommentId, DraftId};

/// A submitted draft under staff review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftApplicationData {
    pub id: ApplicationId,
    pub draft: DraftId,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewer_name: Option<String>,
    #[serde(default)]
    pub submission_notes: String,
    #[serde(default)]
    pub comments: Vec<ApplicationCommentData>,
}

impl DraftApplicationData {
    pub fn phase(&self) -> ApplicationPhase {
        ApplicationPhase::from_status(Some(self.status))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    Message,
    StatusChange,
    #[serde(other)]
    Unknown,
}

/// One entry in the review thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationCommentData {
    pub id: CommentId,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_kind")]
    pub comment_type: CommentKind,
    pub created_at: DateTime<Utc>,
}

fn default_kind() -> CommentKind {
    CommentKind::Message
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn application_parses_thread() {
        let application: DraftApplicationData = serde_json::from_value(json!({
            "id": 3,
            "draft": 12,
            "status": "revisions_requested",
            "submitted_at": "2026-01-04T12:00:00Z",
            "comments": [
                {"id": 1, "text": "Please expand the background.", "created_at": "2026-01-05T09:30:00Z"},
                {"id": 2, "comment_type": "status_change", "text": "Status changed", "created_at": "2026-01-05T09:31:00Z"},
                {"id": 3, "comment_type": "mystery", "created_at": "2026-01-05T09:32:00Z"}
            ]
        }))
        .unwrap();

        assert_eq!(application.phase(), ApplicationPhase::RevisionsRequested);
        assert_eq!(application.comments[0].comment_type, CommentKind::Message);
        assert_eq!(application.comments[1].comment_type, CommentKind::StatusChange);
        assert_eq!(application.comments[2].comment_type, CommentKind::Unknown);
    }
}
