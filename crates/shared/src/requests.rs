//! Request bodies for mutating endpoints

use serde::{Deserialize, Serialize};

use chargen_domain::{FacetId, GiftId, ResonanceId, RosterId, StatName, TechniqueId};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateDraftRequest {}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubmitDraftRequest {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub submission_notes: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResubmitRequest {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddCommentRequest {
    pub text: String,
}

/// Staff shortcut: finalize the draft directly onto a roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddToRosterRequest {
    pub roster: RosterId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDraftGiftRequest {
    pub draft: chargen_domain::DraftId,
    pub gift: GiftId,
    #[serde(default)]
    pub techniques: Vec<TechniqueId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateMotifRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resonances: Option<Vec<ResonanceId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<FacetId>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateAnimaRitualRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<StatName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resonance: Option<ResonanceId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateFacetAssignmentRequest {
    pub draft: chargen_domain::DraftId,
    pub facet: FacetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resonance: Option<ResonanceId>,
}
