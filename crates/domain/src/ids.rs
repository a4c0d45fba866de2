use std::fmt;

use serde::{Deserialize, Serialize};

// The character creation backend keys every record by integer primary key.
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

// Draft and review workflow
define_id!(DraftId);
define_id!(ApplicationId);
define_id!(CommentId);
define_id!(RosterId);

// Origin and ancestry selections
define_id!(AreaId);
define_id!(HeritageId);
define_id!(SpeciesOptionId);
define_id!(FamilyId);

// Path and distinctions
define_id!(PathId);
define_id!(DistinctionId);
define_id!(StatDefinitionId);

// Appearance catalogs
define_id!(HeightBandId);
define_id!(BuildId);

// Magic catalog
define_id!(TraditionId);
define_id!(AffinityId);
define_id!(ResonanceId);
define_id!(GiftId);
define_id!(TechniqueId);
define_id!(FacetId);

// Per-draft magic records
define_id!(DraftGiftId);
define_id!(FacetAssignmentId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_integers() {
        let id = DraftId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: DraftId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn ids_display_their_value() {
        assert_eq!(FamilyId::from(7).to_string(), "7");
        assert_eq!(i64::from(AreaId::new(3)), 3);
    }
}
