//! Aura allocation across three fixed-sum sliders
//!
//! The celestial, primal and abyssal shares of a character's aura always sum
//! to [`AURA_TOTAL`]. Moving one slider pulls the difference proportionally
//! out of the other two.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sum every aura allocation is expected to hold.
pub const AURA_TOTAL: i32 = 100;

/// Move slider `index` to `new_value` and rebalance the other two.
///
/// The new value is clamped to `0..=total`. The change is split across the
/// other sliders in proportion to their current values, rounded, and any
/// rounding remainder goes to whichever of the two is larger afterwards.
///
/// When both other sliders sit at zero there is no weight to redistribute
/// against: only the moved slider changes and the sum no longer equals
/// `total` until another slider moves.
pub fn redistribute(values: [i32; 3], index: usize, new_value: i32, total: i32) -> [i32; 3] {
    let mut result = values;
    let Some(current) = values.get(index).copied() else {
        return result;
    };

    let clamped = new_value.clamp(0, total);
    let (first, second) = match index {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    let (a, b) = (values[first], values[second]);
    let weight = a + b;

    result[index] = clamped;
    if weight == 0 {
        return result;
    }

    let delta = f64::from(clamped - current);
    let share = |value: i32| (delta * f64::from(value) / f64::from(weight)).round() as i32;
    result[first] = (a - share(a)).max(0);
    result[second] = (b - share(b)).max(0);

    let correction = total - result.iter().sum::<i32>();
    let larger = if result[first] >= result[second] {
        first
    } else {
        second
    };
    result[larger] = (result[larger] + correction).max(0);
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuraChannel {
    Celestial,
    Primal,
    Abyssal,
}

impl AuraChannel {
    pub fn all() -> &'static [AuraChannel] {
        &[AuraChannel::Celestial, AuraChannel::Primal, AuraChannel::Abyssal]
    }

    fn index(self) -> usize {
        match self {
            AuraChannel::Celestial => 0,
            AuraChannel::Primal => 1,
            AuraChannel::Abyssal => 2,
        }
    }
}

impl fmt::Display for AuraChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuraChannel::Celestial => write!(f, "Celestial"),
            AuraChannel::Primal => write!(f, "Primal"),
            AuraChannel::Abyssal => write!(f, "Abyssal"),
        }
    }
}

/// Percentages of a character's aura (`draft_data.aura`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuraAllocation {
    pub celestial: i32,
    pub primal: i32,
    pub abyssal: i32,
}

impl Default for AuraAllocation {
    /// An unawakened aura is entirely primal.
    fn default() -> Self {
        Self {
            celestial: 0,
            primal: AURA_TOTAL,
            abyssal: 0,
        }
    }
}

impl AuraAllocation {
    pub fn new(celestial: i32, primal: i32, abyssal: i32) -> Self {
        Self {
            celestial,
            primal,
            abyssal,
        }
    }

    pub fn get(&self, channel: AuraChannel) -> i32 {
        self.as_array()[channel.index()]
    }

    pub fn total(&self) -> i32 {
        self.celestial + self.primal + self.abyssal
    }

    pub fn is_balanced(&self) -> bool {
        self.total() == AURA_TOTAL
    }

    /// Slide one channel to `value`, rebalancing the other two.
    pub fn adjust(&self, channel: AuraChannel, value: i32) -> Self {
        let [celestial, primal, abyssal] =
            redistribute(self.as_array(), channel.index(), value, AURA_TOTAL);
        Self {
            celestial,
            primal,
            abyssal,
        }
    }

    fn as_array(&self) -> [i32; 3] {
        [self.celestial, self.primal, self.abyssal]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proportional_split_preserves_total() {
        let aura = AuraAllocation::new(20, 60, 20).adjust(AuraChannel::Celestial, 40);
        assert_eq!(aura, AuraAllocation::new(40, 45, 15));
        assert!(aura.is_balanced());
    }

    #[test]
    fn rounding_remainder_goes_to_larger_slider() {
        let result = redistribute([10, 30, 60], 0, 17, 100);
        assert_eq!(result.iter().sum::<i32>(), 100);
        assert_eq!(result[0], 17);

        let result = redistribute([0, 33, 67], 0, 1, 100);
        assert_eq!(result, [1, 33, 66]);
    }

    #[test]
    fn lowering_a_slider_feeds_the_others() {
        let aura = AuraAllocation::new(50, 25, 25).adjust(AuraChannel::Celestial, 10);
        assert_eq!(aura, AuraAllocation::new(10, 45, 45));
    }

    #[test]
    fn new_value_is_clamped() {
        let aura = AuraAllocation::new(20, 40, 40).adjust(AuraChannel::Primal, 150);
        assert_eq!(aura, AuraAllocation::new(0, 100, 0));

        let aura = AuraAllocation::new(20, 40, 40).adjust(AuraChannel::Primal, -5);
        assert_eq!(aura.primal, 0);
        assert!(aura.is_balanced());
    }

    #[test]
    fn both_others_at_zero_only_clamps() {
        let aura = AuraAllocation::default().adjust(AuraChannel::Primal, 70);
        assert_eq!(aura, AuraAllocation::new(0, 70, 0));
        assert!(!aura.is_balanced());
    }

    #[test]
    fn moving_another_slider_restores_the_sum() {
        let broken = AuraAllocation::new(0, 70, 0);
        let fixed = broken.adjust(AuraChannel::Abyssal, 10);
        assert!(fixed.is_balanced());
        assert_eq!(fixed.abyssal, 10);
    }

    #[test]
    fn out_of_bounds_index_is_ignored() {
        assert_eq!(redistribute([1, 2, 3], 5, 50, 100), [1, 2, 3]);
    }
}
