//! Primary stats and the attribute point budget
//!
//! Stats are stored in an internal unit of display value × 10 so the backend
//! never needs fractional increments. Display values run 1..=5, internal values
//! 10..=50 on a 10-point grid.
//!
//! The point budget is derived, never stored:
//! `free_points = STAT_POINT_BUDGET - Σ⌊internal / 10⌋`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;

/// Lowest display value a stat can hold.
pub const MIN_DISPLAY: i32 = 1;
/// Highest display value a stat can hold.
pub const MAX_DISPLAY: i32 = 5;
/// Display value every stat starts at.
pub const DEFAULT_DISPLAY: i32 = 2;
/// Internal units per display point.
pub const INTERNAL_SCALE: i32 = 10;
/// Total attribute points: two per stat for the full roster, plus five free.
pub const STAT_POINT_BUDGET: i32 = 23;

/// A primary stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatName {
    Strength,
    Agility,
    Stamina,
    Charm,
    Presence,
    Perception,
    Intellect,
    Wits,
    Willpower,
}

impl StatName {
    /// The canonical roster in display order.
    pub fn all() -> &'static [StatName] {
        &[
            StatName::Strength,
            StatName::Agility,
            StatName::Stamina,
            StatName::Charm,
            StatName::Presence,
            StatName::Perception,
            StatName::Intellect,
            StatName::Wits,
            StatName::Willpower,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatName::Strength => "strength",
            StatName::Agility => "agility",
            StatName::Stamina => "stamina",
            StatName::Charm => "charm",
            StatName::Presence => "presence",
            StatName::Perception => "perception",
            StatName::Intellect => "intellect",
            StatName::Wits => "wits",
            StatName::Willpower => "willpower",
        }
    }

    /// Stat category used to group the allocation grid
    pub fn category(self) -> StatCategory {
        match self {
            StatName::Strength | StatName::Agility | StatName::Stamina => StatCategory::Physical,
            StatName::Charm | StatName::Presence | StatName::Perception => StatCategory::Social,
            StatName::Intellect | StatName::Wits | StatName::Willpower => StatCategory::Mental,
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatName::all()
            .iter()
            .copied()
            .find(|stat| stat.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown stat: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    Physical,
    Social,
    Mental,
}

/// Convert an internal value to its display value (floor division).
pub fn to_display(internal: i32) -> i32 {
    internal.div_euclid(INTERNAL_SCALE)
}

/// Convert a display value to internal units.
pub fn to_internal(display: i32) -> i32 {
    display * INTERNAL_SCALE
}

/// Stat allocation as stored in the draft (`draft_data.stats`).
///
/// Keys the backend sends that are not part of the roster are dropped on read,
/// as are values that are not whole numbers (`20.0` reads as 20).
/// Missing stats are legal; the budget treats them as the default value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, i32>")]
pub struct Stats {
    values: BTreeMap<StatName, i32>,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Internal value of a stat, if allocated
    pub fn get(&self, stat: StatName) -> Option<i32> {
        self.values.get(&stat).copied()
    }

    /// Internal value, falling back to the default allocation
    pub fn get_or_default(&self, stat: StatName) -> i32 {
        self.get(stat).unwrap_or(to_internal(DEFAULT_DISPLAY))
    }

    pub fn display(&self, stat: StatName) -> i32 {
        to_display(self.get_or_default(stat))
    }

    /// Set a stat by display value, rejecting anything outside 1..=5.
    pub fn set_display(&mut self, stat: StatName, display: i32) -> Result<(), DomainError> {
        if !(MIN_DISPLAY..=MAX_DISPLAY).contains(&display) {
            return Err(DomainError::out_of_range(
                stat.as_str(),
                display,
                MIN_DISPLAY,
                MAX_DISPLAY,
            ));
        }
        self.values.insert(stat, to_internal(display));
        Ok(())
    }

    /// Insert a raw internal value without validation (backend data).
    pub fn insert_internal(&mut self, stat: StatName, internal: i32) {
        self.values.insert(stat, internal);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatName, i32)> + '_ {
        self.values.iter().map(|(stat, value)| (*stat, *value))
    }

    /// Check every allocated value sits on the 10..=50 internal grid.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (stat, value) in self.iter() {
            let (min, max) = (to_internal(MIN_DISPLAY), to_internal(MAX_DISPLAY));
            if !(min..=max).contains(&value) {
                return Err(DomainError::out_of_range(stat.as_str(), value, min, max));
            }
            if value % INTERNAL_SCALE != 0 {
                return Err(DomainError::validation(format!(
                    "{} must be a multiple of {}, got {}",
                    stat, INTERNAL_SCALE, value
                )));
            }
        }
        Ok(())
    }

    /// Free points left for this allocation.
    pub fn free_points(&self) -> i32 {
        calculate_free_points(self)
    }
}

fn whole_number(value: &Value) -> Option<i32> {
    let number = match value.as_i64() {
        Some(n) => n,
        None => {
            let float = value.as_f64().filter(|f| f.fract() == 0.0)?;
            float as i64
        }
    };
    i32::try_from(number).ok()
}

impl From<BTreeMap<String, Value>> for Stats {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let values = raw
            .into_iter()
            .filter_map(|(name, value)| {
                let stat = name.parse::<StatName>().ok()?;
                Some((stat, whole_number(&value)?))
            })
            .collect();
        Self { values }
    }
}

impl From<Stats> for BTreeMap<String, i32> {
    fn from(stats: Stats) -> Self {
        stats
            .values
            .into_iter()
            .map(|(stat, value)| (stat.as_str().to_string(), value))
            .collect()
    }
}

impl FromIterator<(StatName, i32)> for Stats {
    fn from_iter<T: IntoIterator<Item = (StatName, i32)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Every roster stat at the default internal value of 20.
pub fn default_stats() -> Stats {
    StatName::all()
        .iter()
        .map(|stat| (*stat, to_internal(DEFAULT_DISPLAY)))
        .collect()
}

/// Free points remaining for a stat allocation over the full roster.
///
/// Stats missing from the allocation count as the default (display 2).
/// Each stat is floored to display units before summing, so an internal 25
/// costs 2, never 2.5 or 3.
pub fn calculate_free_points(stats: &Stats) -> i32 {
    free_points_with_budget(
        StatName::all().iter().map(|stat| stats.get_or_default(*stat)),
        STAT_POINT_BUDGET,
    )
}

/// Budget remainder for an arbitrary set of internal values.
pub fn free_points_with_budget(values: impl IntoIterator<Item = i32>, budget: i32) -> i32 {
    budget - values.into_iter().map(to_display).sum::<i32>()
}
