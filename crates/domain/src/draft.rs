//! Character draft and partial updates
//!
//! A [`Draft`] is the in-progress character as last reported by the backend.
//! Edits travel as a sparse [`DraftPatch`]; applying one to a draft yields the
//! optimistic local view, and [`DraftPatch::expand_against`] produces the body
//! actually sent, with the `draft_data` bag spread over the previous bag.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::aura::AuraAllocation;
use crate::distinctions::DistinctionSelection;
use crate::error::DomainError;
use crate::ids::{
    AreaId, BuildId, DraftId, FamilyId, HeightBandId, HeritageId, PathId, SpeciesOptionId,
    TraditionId,
};
use crate::stage::Stage;
use crate::stats::Stats;

// =============================================================================
// Per-stage draft data
// =============================================================================

/// Lineage scratch data for characters without a known family.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarot_card_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DistinctionsData {
    #[serde(default, skip_serializing_if = "DistinctionSelection::is_empty")]
    pub distinctions: DistinctionSelection,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributesData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MagicData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aura: Option<AuraAllocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magic_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppearanceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_band_id: Option<HeightBandId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_inches: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_id: Option<BuildId>,
}

/// A personal goal written on the identity stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalEntry {
    /// Goal domain (e.g. "Standing", "Wealth")
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdentityData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub goals: Vec<GoalEntry>,
}

/// The draft's scratch bag, split into typed per-stage records.
///
/// On the wire this is one flat JSON object. Keys no stage claims are kept in
/// `extra` and written back unchanged, and so are known keys whose value does
/// not decode. A `null` value counts as unset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct DraftData {
    #[serde(flatten)]
    pub lineage: LineageData,
    #[serde(flatten)]
    pub distinctions: DistinctionsData,
    #[serde(flatten)]
    pub attributes: AttributesData,
    #[serde(flatten)]
    pub magic: MagicData,
    #[serde(flatten)]
    pub appearance: AppearanceData,
    #[serde(flatten)]
    pub identity: IdentityData,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Take `key` out of the bag as a `T`, leaving it in place if it does not decode.
fn take_field<T: DeserializeOwned>(bag: &mut Map<String, Value>, key: &str) -> Option<T> {
    match bag.remove(key)? {
        Value::Null => None,
        value => match T::deserialize(&value) {
            Ok(decoded) => Some(decoded),
            Err(_) => {
                bag.insert(key.to_string(), value);
                None
            }
        },
    }
}

impl From<Map<String, Value>> for DraftData {
    fn from(mut bag: Map<String, Value>) -> Self {
        let lineage = LineageData {
            tarot_card_name: take_field(&mut bag, "tarot_card_name"),
        };
        let distinctions = DistinctionsData {
            distinctions: take_field(&mut bag, "distinctions").unwrap_or_default(),
        };
        let attributes = AttributesData {
            stats: take_field(&mut bag, "stats"),
        };
        let magic = MagicData {
            aura: take_field(&mut bag, "aura"),
            magic_description: take_field(&mut bag, "magic_description"),
        };
        let appearance = AppearanceData {
            age: take_field(&mut bag, "age"),
            height_band_id: take_field(&mut bag, "height_band_id"),
            height_inches: take_field(&mut bag, "height_inches"),
            build_id: take_field(&mut bag, "build_id"),
        };
        let identity = IdentityData {
            first_name: take_field(&mut bag, "first_name"),
            description: take_field(&mut bag, "description"),
            personality: take_field(&mut bag, "personality"),
            background: take_field(&mut bag, "background"),
            goals: take_field(&mut bag, "goals").unwrap_or_default(),
        };
        Self {
            lineage,
            distinctions,
            attributes,
            magic,
            appearance,
            identity,
            extra: bag,
        }
    }
}

impl DraftData {
    /// Object-spread merge: keys in `patch` overwrite keys in `self`.
    pub fn merged_with(&self, patch: &DraftDataPatch) -> Result<DraftData, DomainError> {
        let mut bag = self.to_bag()?;
        for (key, value) in patch.iter() {
            bag.insert(key.clone(), value.clone());
        }
        Ok(serde_json::from_value(Value::Object(bag))?)
    }

    /// The flat JSON bag as sent to the backend.
    pub fn to_bag(&self) -> Result<Map<String, Value>, DomainError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(DomainError::draft_data(format!(
                "draft data serialized to a non-object: {}",
                other
            ))),
        }
    }
}

// =============================================================================
// Draft
// =============================================================================

/// The in-progress character record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: DraftId,
    #[serde(default)]
    pub current_stage: Stage,
    #[serde(default)]
    pub selected_area: Option<AreaId>,
    #[serde(default)]
    pub selected_heritage: Option<HeritageId>,
    #[serde(default)]
    pub selected_species_option: Option<SpeciesOptionId>,
    #[serde(default)]
    pub family: Option<FamilyId>,
    #[serde(default)]
    pub selected_path: Option<PathId>,
    #[serde(default)]
    pub selected_tradition: Option<TraditionId>,
    #[serde(default, deserialize_with = "draft_data_or_default")]
    pub draft_data: DraftData,
    #[serde(default, deserialize_with = "known_stage_flags")]
    pub stage_completion: BTreeMap<Stage, bool>,
}

fn draft_data_or_default<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DraftData, D::Error> {
    let bag = Option::<Map<String, Value>>::deserialize(deserializer)?;
    Ok(bag.map(DraftData::from).unwrap_or_default())
}

/// Completion flags keyed by stage ordinal; unknown ordinals and non-boolean
/// flags are skipped.
fn known_stage_flags<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<Stage, bool>, D::Error> {
    let raw = Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(key, flag)| {
            let stage = key.parse::<u8>().ok().and_then(|n| Stage::from_ordinal(n).ok())?;
            Some((stage, flag.as_bool()?))
        })
        .collect())
}

impl Draft {
    /// A fresh draft as the backend creates it.
    pub fn new(id: DraftId) -> Self {
        Self {
            id,
            current_stage: Stage::Origin,
            selected_area: None,
            selected_heritage: None,
            selected_species_option: None,
            family: None,
            selected_path: None,
            selected_tradition: None,
            draft_data: DraftData::default(),
            stage_completion: BTreeMap::new(),
        }
    }

    /// Stored completion flag for a stage (missing means incomplete).
    pub fn is_stage_marked_complete(&self, stage: Stage) -> bool {
        self.stage_completion.get(&stage).copied().unwrap_or(false)
    }

    /// Apply a sparse patch, returning the merged draft.
    pub fn apply_patch(&self, patch: &DraftPatch) -> Result<Draft, DomainError> {
        let mut draft = self.clone();
        if let Some(stage) = patch.current_stage {
            draft.current_stage = stage;
        }
        if let Some(area) = patch.selected_area {
            draft.selected_area = area;
        }
        if let Some(heritage) = patch.selected_heritage {
            draft.selected_heritage = heritage;
        }
        if let Some(option) = patch.selected_species_option {
            draft.selected_species_option = option;
        }
        if let Some(family) = patch.family {
            draft.family = family;
        }
        if let Some(path) = patch.selected_path {
            draft.selected_path = path;
        }
        if let Some(tradition) = patch.selected_tradition {
            draft.selected_tradition = tradition;
        }
        if let Some(data) = &patch.draft_data {
            draft.draft_data = draft.draft_data.merged_with(data)?;
        }
        if let Some(completion) = &patch.stage_completion {
            draft
                .stage_completion
                .extend(completion.iter().map(|(stage, done)| (*stage, *done)));
        }
        Ok(draft)
    }
}

// =============================================================================
// Patches
// =============================================================================

/// Sparse set of `draft_data` keys to overwrite.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftDataPatch(Map<String, Value>);

impl DraftDataPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a raw key.
    pub fn set(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    /// Set a key from any serializable value.
    pub fn set_value<T: Serialize>(
        self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self, DomainError> {
        Ok(self.set(key, serde_json::to_value(value)?))
    }

    /// Set the stat allocation; every value must sit on the 10..=50 grid.
    pub fn stats(self, stats: &Stats) -> Result<Self, DomainError> {
        stats.validate()?;
        self.set_value("stats", stats)
    }

    pub fn aura(self, aura: &AuraAllocation) -> Result<Self, DomainError> {
        self.set_value("aura", aura)
    }

    pub fn distinctions(self, selection: &DistinctionSelection) -> Result<Self, DomainError> {
        self.set_value("distinctions", selection)
    }

    pub fn text(self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(key, Value::String(text.into()))
    }

    /// Later keys overwrite earlier ones.
    pub fn merge(mut self, later: DraftDataPatch) -> Self {
        self.0.extend(later.0);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for DraftDataPatch {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// A partial update of a draft.
///
/// Selection fields are doubly optional: `None` leaves the field alone,
/// `Some(None)` clears it (sent as `null`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DraftPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_stage: Option<Stage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_area: Option<Option<AreaId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_heritage: Option<Option<HeritageId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_species_option: Option<Option<SpeciesOptionId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<Option<FamilyId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_path: Option<Option<PathId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_tradition: Option<Option<TraditionId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_data: Option<DraftDataPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_completion: Option<BTreeMap<Stage, bool>>,
}

impl DraftPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.current_stage = Some(stage);
        self
    }

    pub fn area(mut self, area: Option<AreaId>) -> Self {
        self.selected_area = Some(area);
        self
    }

    pub fn heritage(mut self, heritage: Option<HeritageId>) -> Self {
        self.selected_heritage = Some(heritage);
        self
    }

    pub fn species_option(mut self, option: Option<SpeciesOptionId>) -> Self {
        self.selected_species_option = Some(option);
        self
    }

    pub fn family(mut self, family: Option<FamilyId>) -> Self {
        self.family = Some(family);
        self
    }

    pub fn path(mut self, path: Option<PathId>) -> Self {
        self.selected_path = Some(path);
        self
    }

    pub fn tradition(mut self, tradition: Option<TraditionId>) -> Self {
        self.selected_tradition = Some(tradition);
        self
    }

    pub fn data(mut self, data: DraftDataPatch) -> Self {
        self.draft_data = Some(match self.draft_data.take() {
            Some(existing) => existing.merge(data),
            None => data,
        });
        self
    }

    pub fn completion(mut self, stage: Stage, complete: bool) -> Self {
        self.stage_completion
            .get_or_insert_with(BTreeMap::new)
            .insert(stage, complete);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == DraftPatch::default()
    }

    /// Combine two patches; fields set in `later` win, nested keys included.
    pub fn merge(self, later: DraftPatch) -> DraftPatch {
        let draft_data = match (self.draft_data, later.draft_data) {
            (Some(earlier), Some(later)) => Some(earlier.merge(later)),
            (earlier, later) => later.or(earlier),
        };
        let stage_completion = match (self.stage_completion, later.stage_completion) {
            (Some(mut earlier), Some(later)) => {
                earlier.extend(later);
                Some(earlier)
            }
            (earlier, later) => later.or(earlier),
        };
        DraftPatch {
            current_stage: later.current_stage.or(self.current_stage),
            selected_area: later.selected_area.or(self.selected_area),
            selected_heritage: later.selected_heritage.or(self.selected_heritage),
            selected_species_option: later
                .selected_species_option
                .or(self.selected_species_option),
            family: later.family.or(self.family),
            selected_path: later.selected_path.or(self.selected_path),
            selected_tradition: later.selected_tradition.or(self.selected_tradition),
            draft_data,
            stage_completion,
        }
    }

    /// The request body for this patch against `base`.
    ///
    /// `draft_data` is replaced by the full merged bag and `stage_completion`
    /// by the full merged map, so the backend never drops keys the patch did
    /// not touch.
    pub fn expand_against(&self, base: &Draft) -> Result<DraftPatch, DomainError> {
        let merged = base.apply_patch(self)?;
        let mut body = self.clone();
        if self.draft_data.is_some() {
            body.draft_data = Some(DraftDataPatch::from(merged.draft_data.to_bag()?));
        }
        if self.stage_completion.is_some() {
            body.stage_completion = Some(merged.stage_completion);
        }
        Ok(body)
    }
}
