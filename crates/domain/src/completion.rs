//! Stage completion rules
//!
//! Completion is derived from the draft, never trusted from storage. The
//! derived flags are pushed back to the backend so the stage stepper can show
//! status without re-running these rules.

use std::collections::BTreeMap;

use crate::draft::{Draft, DraftPatch};
use crate::stage::Stage;
use crate::stats::calculate_free_points;

fn is_filled(text: &Option<String>) -> bool {
    text.as_deref().is_some_and(|t| !t.trim().is_empty())
}

/// Whether a single stage is complete for this draft.
///
/// Final Touches has no derivable requirement; its stored flag is the user's
/// explicit toggle and is returned as is.
pub fn is_stage_complete(draft: &Draft, stage: Stage) -> bool {
    let data = &draft.draft_data;
    match stage {
        Stage::Origin => draft.selected_area.is_some(),
        Stage::Heritage => {
            draft.selected_heritage.is_some() && draft.selected_species_option.is_some()
        }
        Stage::Lineage => draft.family.is_some() || is_filled(&data.lineage.tarot_card_name),
        // Points may remain unspent; one pick is enough.
        Stage::Distinctions => !data.distinctions.distinctions.is_empty(),
        Stage::Path => draft.selected_path.is_some(),
        Stage::Attributes => data
            .attributes
            .stats
            .as_ref()
            .is_some_and(|stats| calculate_free_points(stats) == 0),
        Stage::Magic => {
            draft.selected_tradition.is_some()
                && data.magic.aura.is_some_and(|aura| aura.is_balanced())
        }
        Stage::Appearance => {
            data.appearance.age.is_some()
                && data.appearance.height_band_id.is_some()
                && data.appearance.build_id.is_some()
        }
        Stage::Identity => {
            let identity = &data.identity;
            is_filled(&identity.first_name)
                && is_filled(&identity.description)
                && is_filled(&identity.personality)
                && is_filled(&identity.background)
        }
        Stage::FinalTouches => draft.is_stage_marked_complete(Stage::FinalTouches),
        Stage::Review => Stage::required()
            .iter()
            .all(|required| is_stage_complete(draft, *required)),
    }
}

/// Completion flags for every stage.
pub fn derive_completion(draft: &Draft) -> BTreeMap<Stage, bool> {
    Stage::all()
        .iter()
        .map(|stage| (*stage, is_stage_complete(draft, *stage)))
        .collect()
}

/// Patch that brings the stored flags in line with the derived ones.
///
/// Returns `None` when nothing would change, so callers can skip the request.
pub fn completion_patch(draft: &Draft) -> Option<DraftPatch> {
    let patch = derive_completion(draft)
        .into_iter()
        .filter(|(stage, done)| draft.is_stage_marked_complete(*stage) != *done)
        .fold(DraftPatch::new(), |patch, (stage, done)| {
            patch.completion(stage, done)
        });
    (!patch.is_empty()).then_some(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aura::AuraAllocation;
    use crate::distinctions::SelectedDistinction;
    use crate::ids::{
        AreaId, BuildId, DistinctionId, DraftId, FamilyId, HeightBandId, HeritageId, PathId,
        SpeciesOptionId, TraditionId,
    };
    use crate::stats::{default_stats, StatName};

    fn complete_draft() -> Draft {
        let mut draft = Draft::new(DraftId::new(1));
        draft.selected_area = Some(AreaId::new(1));
        draft.selected_heritage = Some(HeritageId::new(1));
        draft.selected_species_option = Some(SpeciesOptionId::new(2));
        draft.family = Some(FamilyId::new(3));
        draft.selected_path = Some(PathId::new(4));
        draft.selected_tradition = Some(TraditionId::new(5));

        let data = &mut draft.draft_data;
        data.distinctions
            .distinctions
            .select(SelectedDistinction::new(DistinctionId::new(1), "Patient", 2));
        let mut stats = default_stats();
        for stat in [
            StatName::Strength,
            StatName::Agility,
            StatName::Stamina,
            StatName::Wits,
            StatName::Willpower,
        ] {
            stats.insert_internal(stat, 30);
        }
        data.attributes.stats = Some(stats);
        data.magic.aura = Some(AuraAllocation::new(10, 80, 10));
        data.appearance.age = Some(24);
        data.appearance.height_band_id = Some(HeightBandId::new(2));
        data.appearance.build_id = Some(BuildId::new(3));
        data.identity.first_name = Some("Ariadne".into());
        data.identity.description = Some("Tall".into());
        data.identity.personality = Some("Wry".into());
        data.identity.background = Some("Raised in Arx".into());
        draft
    }

    #[test]
    fn fully_filled_draft_is_reviewable() {
        let draft = complete_draft();
        for stage in Stage::required() {
            assert!(is_stage_complete(&draft, *stage), "{stage} incomplete");
        }
        assert!(is_stage_complete(&draft, Stage::Review));
    }

    #[test]
    fn attributes_need_zero_free_points() {
        let mut draft = complete_draft();
        draft.draft_data.attributes.stats = Some(default_stats());
        assert!(!is_stage_complete(&draft, Stage::Attributes));
        assert!(!is_stage_complete(&draft, Stage::Review));

        draft.draft_data.attributes.stats = None;
        assert!(!is_stage_complete(&draft, Stage::Attributes));
    }

    #[test]
    fn one_distinction_is_enough() {
        let mut draft = Draft::new(DraftId::new(1));
        assert!(!is_stage_complete(&draft, Stage::Distinctions));
        draft
            .draft_data
            .distinctions
            .distinctions
            .select(SelectedDistinction::new(DistinctionId::new(8), "Scarred", -1));
        assert!(is_stage_complete(&draft, Stage::Distinctions));
    }

    #[test]
    fn lineage_accepts_tarot_card() {
        let mut draft = Draft::new(DraftId::new(1));
        draft.draft_data.lineage.tarot_card_name = Some("The Tower".into());
        assert!(is_stage_complete(&draft, Stage::Lineage));
        draft.draft_data.lineage.tarot_card_name = Some("   ".into());
        assert!(!is_stage_complete(&draft, Stage::Lineage));
    }

    #[test]
    fn unbalanced_aura_blocks_magic() {
        let mut draft = complete_draft();
        draft.draft_data.magic.aura = Some(AuraAllocation::new(0, 70, 0));
        assert!(!is_stage_complete(&draft, Stage::Magic));
    }

    #[test]
    fn final_touches_keeps_manual_flag() {
        let mut draft = Draft::new(DraftId::new(1));
        assert!(!is_stage_complete(&draft, Stage::FinalTouches));
        draft.stage_completion.insert(Stage::FinalTouches, true);
        assert!(is_stage_complete(&draft, Stage::FinalTouches));
    }

    #[test]
    fn completion_patch_only_carries_changes() {
        let mut draft = complete_draft();
        draft.stage_completion = derive_completion(&draft);
        assert!(completion_patch(&draft).is_none());

        draft.selected_path = None;
        let patch = completion_patch(&draft).unwrap();
        let flags = patch.stage_completion.unwrap();
        assert_eq!(flags.get(&Stage::Path), Some(&false));
        assert_eq!(flags.get(&Stage::Review), Some(&false));
        assert_eq!(flags.len(), 2);
    }
}
