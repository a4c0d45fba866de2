//! Resonance projection for the magic stage
//!
//! Gifts, the motif and the anima ritual each feed resonances. The projection
//! totals those contributions so the player sees where their magic leans
//! before submitting.

use std::collections::BTreeMap;

use crate::ids::ResonanceId;

/// Where a resonance contribution comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResonanceSource {
    Gift,
    Motif,
    AnimaRitual,
}

/// One contribution toward a resonance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResonanceContribution {
    pub resonance_id: ResonanceId,
    pub resonance_name: String,
    pub source: ResonanceSource,
    pub amount: i32,
}

/// Projected total for a single resonance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResonanceProjection {
    pub resonance_id: ResonanceId,
    pub resonance_name: String,
    pub total: i32,
    pub sources: Vec<ResonanceSource>,
}

/// Sum contributions per resonance, strongest first, ties by name.
pub fn project_resonances(contributions: &[ResonanceContribution]) -> Vec<ResonanceProjection> {
    let mut by_id: BTreeMap<ResonanceId, ResonanceProjection> = BTreeMap::new();
    for contribution in contributions {
        let entry = by_id
            .entry(contribution.resonance_id)
            .or_insert_with(|| ResonanceProjection {
                resonance_id: contribution.resonance_id,
                resonance_name: contribution.resonance_name.clone(),
                total: 0,
                sources: Vec::new(),
            });
        entry.total += contribution.amount;
        if !entry.sources.contains(&contribution.source) {
            entry.sources.push(contribution.source);
        }
    }

    let mut projections: Vec<_> = by_id.into_values().collect();
    projections.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.resonance_name.cmp(&b.resonance_name))
    });
    projections
}
