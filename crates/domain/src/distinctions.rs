//! Distinction selection
//!
//! Distinctions are advantages or disadvantages with a point cost. A draft
//! holds a set of them keyed by distinction id; eligibility and caps are
//! enforced by the backend.

use serde::{Deserialize, Serialize};

use crate::ids::DistinctionId;

/// A distinction chosen for the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDistinction {
    pub distinction_id: DistinctionId,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_rank")]
    pub rank: u8,
    /// Point cost at the chosen rank; negative for disadvantages
    pub cost: i32,
}

fn default_rank() -> u8 {
    1
}

impl SelectedDistinction {
    pub fn new(distinction_id: DistinctionId, name: impl Into<String>, cost: i32) -> Self {
        Self {
            distinction_id,
            name: name.into(),
            rank: 1,
            cost,
        }
    }

    pub fn with_rank(mut self, rank: u8) -> Self {
        self.rank = rank;
        self
    }
}

/// Set of selected distinctions, serialized as a list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistinctionSelection {
    entries: Vec<SelectedDistinction>,
}

impl DistinctionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a distinction, replacing an earlier entry with the same id.
    pub fn select(&mut self, distinction: SelectedDistinction) {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.distinction_id == distinction.distinction_id)
        {
            Some(existing) => *existing = distinction,
            None => self.entries.push(distinction),
        }
    }

    /// Remove a distinction; returns whether it was selected.
    pub fn deselect(&mut self, distinction_id: DistinctionId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| entry.distinction_id != distinction_id);
        before != self.entries.len()
    }

    pub fn contains(&self, distinction_id: DistinctionId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.distinction_id == distinction_id)
    }

    pub fn total_cost(&self) -> i32 {
        self.entries.iter().map(|entry| entry.cost).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectedDistinction> {
        self.entries.iter()
    }
}

impl FromIterator<SelectedDistinction> for DistinctionSelection {
    fn from_iter<T: IntoIterator<Item = SelectedDistinction>>(iter: T) -> Self {
        let mut selection = Self::new();
        for distinction in iter {
            selection.select(distinction);
        }
        selection
    }
}
