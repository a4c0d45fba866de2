//! Magic catalog and per-draft magic records

use serde::{Deserialize, Serialize};

use chargen_domain::{
    AffinityId, DraftGiftId, DraftId, FacetAssignmentId, FacetId, GiftId, ResonanceContribution,
    ResonanceId, ResonanceSource, StatName, TechniqueId, TraditionId,
};

// =============================================================================
// Catalog
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffinityData {
    pub id: AffinityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonanceData {
    pub id: ResonanceId,
    pub name: String,
    #[serde(default)]
    pub affinity: Option<AffinityId>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraditionData {
    pub id: TraditionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftData {
    pub id: GiftId,
    pub name: String,
    #[serde(default)]
    pub affinity: Option<AffinityId>,
    #[serde(default)]
    pub description: String,
    /// Resonances this gift is attuned to
    #[serde(default)]
    pub resonances: Vec<ResonanceId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechniqueData {
    pub id: TechniqueId,
    pub name: String,
    pub gift: GiftId,
    #[serde(default)]
    pub level: u8,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetData {
    pub id: FacetId,
    pub name: String,
    #[serde(default)]
    pub parent: Option<FacetId>,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Per-draft records
// =============================================================================

/// A gift the draft has taken, with its chosen techniques.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftGiftData {
    pub id: DraftGiftId,
    pub draft: DraftId,
    pub gift: GiftId,
    #[serde(default)]
    pub gift_name: String,
    #[serde(default)]
    pub techniques: Vec<TechniqueId>,
    /// Resonances (with strength) the gift grants the draft
    #[serde(default)]
    pub resonances: Vec<ResonanceStrengthData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonanceStrengthData {
    pub resonance: ResonanceId,
    #[serde(default)]
    pub resonance_name: String,
    #[serde(default = "default_strength")]
    pub strength: i32,
}

fn default_strength() -> i32 {
    1
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MotifData {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub resonances: Vec<ResonanceStrengthData>,
    #[serde(default)]
    pub facets: Vec<FacetId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimaRitualData {
    #[serde(default)]
    pub stat: Option<StatName>,
    #[serde(default)]
    pub skill_name: Option<String>,
    #[serde(default)]
    pub resonance: Option<ResonanceStrengthData>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetAssignmentData {
    pub id: FacetAssignmentId,
    pub draft: DraftId,
    pub facet: FacetId,
    #[serde(default)]
    pub facet_name: String,
    #[serde(default)]
    pub resonance: Option<ResonanceId>,
}

fn contribution(
    resonance: &ResonanceStrengthData,
    source: ResonanceSource,
) -> ResonanceContribution {
    ResonanceContribution {
        resonance_id: resonance.resonance,
        resonance_name: resonance.resonance_name.clone(),
        source,
        amount: resonance.strength,
    }
}

/// Collect resonance contributions from every magic record of a draft.
pub fn resonance_contributions(
    gifts: &[DraftGiftData],
    motif: Option<&MotifData>,
    ritual: Option<&AnimaRitualData>,
) -> Vec<ResonanceContribution> {
    let from_gifts = gifts
        .iter()
        .flat_map(|gift| gift.resonances.iter())
        .map(|r| contribution(r, ResonanceSource::Gift));
    let from_motif = motif
        .into_iter()
        .flat_map(|motif| motif.resonances.iter())
        .map(|r| contribution(r, ResonanceSource::Motif));
    let from_ritual = ritual
        .and_then(|ritual| ritual.resonance.as_ref())
        .map(|r| contribution(r, ResonanceSource::AnimaRitual));

    from_gifts.chain(from_motif).chain(from_ritual).collect()
}
