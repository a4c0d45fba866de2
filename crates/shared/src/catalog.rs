//! Read-only catalog DTOs
//!
//! Everything the wizard offers as a choice comes from these endpoints. The
//! client treats the records as opaque display data and only keeps their ids.

use serde::{Deserialize, Serialize};

use chargen_domain::{
    AreaId, BuildId, DistinctionId, FamilyId, HeightBandId, HeritageId, PathId, RealmTheme,
    SpeciesOptionId, StatDefinitionId, StatName,
};

/// Starting area (city or region) for the origin stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartingAreaData {
    pub id: AreaId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub realm_name: Option<String>,
    #[serde(default)]
    pub crest_image: Option<String>,
    /// Whether the current account may pick this area
    #[serde(default = "default_true")]
    pub is_accessible: bool,
}

impl StartingAreaData {
    /// Theme derived from the realm name, falling back to the area name.
    pub fn theme(&self) -> RealmTheme {
        let by_realm = self
            .realm_name
            .as_deref()
            .map(RealmTheme::from_name)
            .unwrap_or_default();
        if by_realm == RealmTheme::Default {
            RealmTheme::from_name(&self.name)
        } else {
            by_realm
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeritageData {
    pub id: HeritageId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Special heritages skip the family picker
    #[serde(default)]
    pub is_special: bool,
    #[serde(default)]
    pub family_known: bool,
}

/// A playable species offered under a heritage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesOptionData {
    pub id: SpeciesOptionId,
    pub species_name: String,
    #[serde(default)]
    pub description: String,
    /// CG point cost of picking this option
    #[serde(default)]
    pub cg_point_cost: i32,
    #[serde(default)]
    pub stat_bonuses: Vec<StatBonusData>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatBonusData {
    pub stat: StatName,
    pub amount: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyData {
    pub id: FamilyId,
    pub name: String,
    #[serde(default)]
    pub family_type: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathData {
    pub id: PathId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub aspects: Vec<String>,
    #[serde(default)]
    pub icon_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistinctionCategoryData {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistinctionData {
    pub id: DistinctionId,
    pub name: String,
    pub slug: String,
    pub category_slug: String,
    #[serde(default)]
    pub description: String,
    /// Point cost per rank; negative for disadvantages
    pub cost_per_rank: i32,
    #[serde(default = "default_max_rank")]
    pub max_rank: u8,
    #[serde(default)]
    pub is_locked: bool,
}

fn default_max_rank() -> u8 {
    1
}

impl DistinctionData {
    pub fn cost_at_rank(&self, rank: u8) -> i32 {
        self.cost_per_rank * i32::from(rank.clamp(1, self.max_rank.max(1)))
    }

    /// Selection entry stored in the draft for this distinction.
    pub fn to_selection(&self, rank: u8) -> chargen_domain::SelectedDistinction {
        let rank = rank.clamp(1, self.max_rank.max(1));
        chargen_domain::SelectedDistinction::new(self.id, self.name.clone(), self.cost_at_rank(rank))
            .with_rank(rank)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatDefinitionData {
    pub id: StatDefinitionId,
    pub name: StatName,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightBandData {
    pub id: HeightBandId,
    pub name: String,
    pub min_inches: u16,
    pub max_inches: u16,
}

impl HeightBandData {
    pub fn contains(&self, inches: u16) -> bool {
        (self.min_inches..=self.max_inches).contains(&inches)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildData {
    pub id: BuildId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}
