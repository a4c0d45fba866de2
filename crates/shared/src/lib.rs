//! Character creation wire contract
//!
//! Types shared between the backend's REST API and the client:
//! - Catalog DTOs (areas, heritages, distinctions, magic, appearance)
//! - Review workflow DTOs
//! - Request bodies and list envelopes
//! - Endpoint path builders
//!
//! Drafts themselves travel as [`chargen_domain::Draft`] and
//! [`chargen_domain::DraftPatch`]; this crate adds no business logic beyond
//! small display helpers.

pub mod application;
pub mod catalog;
pub mod cg_points;
pub mod magic;
pub mod requests;
pub mod responses;
pub mod routes;

pub use application::{ApplicationCommentData, CommentKind, DraftApplicationData};
pub use catalog::{
    BuildData, DistinctionCategoryData, DistinctionData, FamilyData, HeightBandData,
    HeritageData, PathData, SpeciesOptionData, StartingAreaData, StatBonusData,
    StatDefinitionData,
};
pub use cg_points::{CgPointEntryData, CgPointsBreakdownData};
pub use magic::{
    resonance_contributions, AffinityData, AnimaRitualData, DraftGiftData, FacetAssignmentData,
    FacetData, GiftData, MotifData, ResonanceData, ResonanceStrengthData, TechniqueData,
    TraditionData,
};
pub use requests::{
    AddCommentRequest, AddToRosterRequest, CreateDraftGiftRequest, CreateDraftRequest,
    CreateFacetAssignmentRequest, ResubmitRequest, SubmitDraftRequest, UpdateAnimaRitualRequest,
    UpdateMotifRequest,
};
pub use responses::{ListResponse, RosterEntryData};
