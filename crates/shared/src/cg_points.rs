//! Character generation point breakdown computed by the backend

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CgPointEntryData {
    pub category: String,
    pub item_name: String,
    pub cost: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CgPointsBreakdownData {
    pub starting_budget: i32,
    #[serde(default)]
    pub breakdown: Vec<CgPointEntryData>,
    pub spent: i32,
    pub remaining: i32,
}

impl CgPointsBreakdownData {
    /// Sum of entries in one category.
    pub fn spent_in(&self, category: &str) -> i32 {
        self.breakdown
            .iter()
            .filter(|entry| entry.category == category)
            .map(|entry| entry.cost)
            .sum()
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_totals() {
        let points: CgPointsBreakdownData = serde_json::from_value(json!({
            "starting_budget": 100,
            "breakdown": [
                {"category": "species", "item_name": "Human", "cost": 0},
                {"category": "distinctions", "item_name": "Wealthy", "cost": 10},
                {"category": "distinctions", "item_name": "Scarred", "cost": -2}
            ],
            "spent": 8,
            "remaining": 92
        }))
        .unwrap();
        assert_eq!(points.spent_in("distinctions"), 8);
        assert_eq!(points.spent_in("magic"), 0);
        assert!(!points.is_overspent());
    }
}
