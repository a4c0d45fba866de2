//! Character creation domain.
//!
//! Pure types and rules for the character creation wizard: the draft and its
//! partial updates, the attribute point budget, stage completion, aura
//! sliders, the review workflow read model and a few display mappings.
//! Nothing here performs I/O.

pub mod application;
pub mod aura;
pub mod completion;
pub mod distinctions;
pub mod draft;
pub mod error;
pub mod ids;
pub mod magic;
pub mod realm;
pub mod stage;
pub mod stats;

pub use application::{ApplicationActions, ApplicationPhase, ApplicationStatus, BadgeVariant};
pub use aura::{redistribute, AuraAllocation, AuraChannel, AURA_TOTAL};
pub use completion::{completion_patch, derive_completion, is_stage_complete};
pub use distinctions::{DistinctionSelection, SelectedDistinction};
pub use draft::{
    AppearanceData, AttributesData, DistinctionsData, Draft, DraftData, DraftDataPatch,
    DraftPatch, GoalEntry, IdentityData, LineageData, MagicData,
};
pub use error::DomainError;
pub use ids::{
    AffinityId, ApplicationId, AreaId, BuildId, CommentId, DistinctionId, DraftGiftId, DraftId,
    FacetAssignmentId, FacetId, FamilyId, GiftId, HeightBandId, HeritageId, PathId, ResonanceId,
    RosterId, SpeciesOptionId, StatDefinitionId, TechniqueId, TraditionId,
};
pub use magic::{project_resonances, ResonanceContribution, ResonanceProjection, ResonanceSource};
pub use realm::RealmTheme;
pub use stage::Stage;
pub use stats::{
    calculate_free_points, default_stats, free_points_with_budget, to_display, to_internal,
    StatCategory, StatName, Stats, STAT_POINT_BUDGET,
};
