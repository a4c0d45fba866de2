//! Endpoint paths
//!
//! All paths are relative to the API origin and keep Django's trailing slash.

use chargen_domain::{AreaId, DraftGiftId, DraftId, FacetAssignmentId, GiftId, HeritageId};

pub const BASE: &str = "/api/character-creation";

pub fn drafts() -> String {
    format!("{BASE}/drafts/")
}

/// Also the prefix of every query scoped to this draft.
pub fn draft(id: DraftId) -> String {
    format!("{BASE}/drafts/{id}/")
}

pub fn draft_submit(id: DraftId) -> String {
    format!("{BASE}/drafts/{id}/submit/")
}

pub fn draft_unsubmit(id: DraftId) -> String {
    format!("{BASE}/drafts/{id}/unsubmit/")
}

pub fn draft_withdraw(id: DraftId) -> String {
    format!("{BASE}/drafts/{id}/withdraw/")
}

pub fn draft_resubmit(id: DraftId) -> String {
    format!("{BASE}/drafts/{id}/resubmit/")
}

pub fn draft_add_to_roster(id: DraftId) -> String {
    format!("{BASE}/drafts/{id}/add-to-roster/")
}

pub fn draft_cg_points(id: DraftId) -> String {
    format!("{BASE}/drafts/{id}/cg-points/")
}

pub fn draft_application(id: DraftId) -> String {
    format!("{BASE}/drafts/{id}/application/")
}

pub fn draft_application_comments(id: DraftId) -> String {
    format!("{BASE}/drafts/{id}/application/comments/")
}

pub fn draft_motif(id: DraftId) -> String {
    format!("{BASE}/drafts/{id}/motif/")
}

pub fn draft_anima_ritual(id: DraftId) -> String {
    format!("{BASE}/drafts/{id}/anima-ritual/")
}

pub fn draft_gifts(draft: DraftId) -> String {
    format!("{BASE}/draft-gifts/?draft={draft}")
}

pub fn draft_gifts_collection() -> String {
    format!("{BASE}/draft-gifts/")
}

pub fn draft_gift(id: DraftGiftId) -> String {
    format!("{BASE}/draft-gifts/{id}/")
}

pub fn facet_assignments(draft: DraftId) -> String {
    format!("{BASE}/draft-facet-assignments/?draft={draft}")
}

pub fn facet_assignments_collection() -> String {
    format!("{BASE}/draft-facet-assignments/")
}

pub fn facet_assignment(id: FacetAssignmentId) -> String {
    format!("{BASE}/draft-facet-assignments/{id}/")
}

// =============================================================================
// Catalogs
// =============================================================================

pub fn areas() -> String {
    format!("{BASE}/areas/")
}

pub fn heritages() -> String {
    format!("{BASE}/heritages/")
}

pub fn species_options(heritage: HeritageId) -> String {
    format!("{BASE}/species-options/?heritage={heritage}")
}

pub fn families(area: AreaId) -> String {
    format!("{BASE}/families/?area={area}")
}

pub fn paths() -> String {
    format!("{BASE}/paths/")
}

pub fn distinction_categories() -> String {
    format!("{BASE}/distinctions/categories/")
}

pub fn distinctions(category_slug: &str) -> String {
    format!("{BASE}/distinctions/?category={category_slug}")
}

pub fn stat_definitions() -> String {
    format!("{BASE}/stat-definitions/")
}

pub fn affinities() -> String {
    format!("{BASE}/magic/affinities/")
}

pub fn resonances() -> String {
    format!("{BASE}/magic/resonances/")
}

pub fn traditions() -> String {
    format!("{BASE}/magic/traditions/")
}

pub fn gifts() -> String {
    format!("{BASE}/magic/gifts/")
}

pub fn techniques(gift: GiftId) -> String {
    format!("{BASE}/magic/techniques/?gift={gift}")
}

pub fn facets() -> String {
    format!("{BASE}/magic/facets/")
}

pub fn height_bands() -> String {
    format!("{BASE}/height-bands/")
}

pub fn builds() -> String {
    format!("{BASE}/builds/")
}
