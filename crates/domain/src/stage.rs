//! Wizard stages
//!
//! Stages are linear but freely navigable. On the wire a stage is its ordinal
//! (`1..=11`), and the completion map uses the ordinal as its key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// One step of the character creation wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Stage {
    #[default]
    Origin,
    Heritage,
    Lineage,
    Distinctions,
    Path,
    Attributes,
    Magic,
    Appearance,
    Identity,
    FinalTouches,
    Review,
}

impl Stage {
    /// All stages in wizard order.
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Origin,
            Stage::Heritage,
            Stage::Lineage,
            Stage::Distinctions,
            Stage::Path,
            Stage::Attributes,
            Stage::Magic,
            Stage::Appearance,
            Stage::Identity,
            Stage::FinalTouches,
            Stage::Review,
        ]
    }

    /// Stages that must be complete before the draft can be reviewed.
    pub fn required() -> &'static [Stage] {
        &Stage::all()[..9]
    }

    pub fn first() -> Stage {
        Stage::Origin
    }

    pub fn ordinal(self) -> u8 {
        match self {
            Stage::Origin => 1,
            Stage::Heritage => 2,
            Stage::Lineage => 3,
            Stage::Distinctions => 4,
            Stage::Path => 5,
            Stage::Attributes => 6,
            Stage::Magic => 7,
            Stage::Appearance => 8,
            Stage::Identity => 9,
            Stage::FinalTouches => 10,
            Stage::Review => 11,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Result<Stage, DomainError> {
        Stage::all()
            .iter()
            .copied()
            .find(|stage| stage.ordinal() == ordinal)
            .ok_or_else(|| DomainError::parse(format!("Unknown stage ordinal: {}", ordinal)))
    }

    pub fn previous(self) -> Option<Stage> {
        Stage::from_ordinal(self.ordinal().checked_sub(1)?).ok()
    }

    pub fn next(self) -> Option<Stage> {
        Stage::from_ordinal(self.ordinal() + 1).ok()
    }

    /// Label shown in the stage stepper
    pub fn display_name(self) -> &'static str {
        match self {
            Stage::Origin => "Origin",
            Stage::Heritage => "Heritage",
            Stage::Lineage => "Lineage",
            Stage::Distinctions => "Distinctions",
            Stage::Path => "Path",
            Stage::Attributes => "Attributes",
            Stage::Magic => "Magic",
            Stage::Appearance => "Appearance",
            Stage::Identity => "Identity",
            Stage::FinalTouches => "Final Touches",
            Stage::Review => "Review",
        }
    }
}

impl TryFrom<u8> for Stage {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Stage::from_ordinal(value)
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.ordinal()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
