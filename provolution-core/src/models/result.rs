use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Allowed drift of the summed breakdown percentages away from 100.
///
/// The API rounds each share to one decimal place, so four shares can
/// legitimately add up to anything within a few tenths of 100.
pub const BREAKDOWN_TOLERANCE_PERCENT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "* easy",
            Self::Medium => "** medium",
            Self::Hard => "*** hard",
        }
    }
}

/// Per-category attribution of the total footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub housing_kg: f64,
    pub mobility_kg: f64,
    pub nutrition_kg: f64,
    pub consumption_kg: f64,
    pub total_kg: f64,

    pub housing_percent: f64,
    pub mobility_percent: f64,
    pub nutrition_percent: f64,
    pub consumption_percent: f64,
}

impl Breakdown {
    pub fn percent_total(&self) -> f64 {
        self.housing_percent
            + self.mobility_percent
            + self.nutrition_percent
            + self.consumption_percent
    }

    /// True when the four shares add up to 100 within
    /// [`BREAKDOWN_TOLERANCE_PERCENT`].
    pub fn is_consistent(&self) -> bool {
        (self.percent_total() - 100.0).abs() <= BREAKDOWN_TOLERANCE_PERCENT
    }

    /// Shares in display order, paired with their category name.
    pub fn shares(&self) -> [(&'static str, f64); 4] {
        [
            ("housing", self.housing_percent),
            ("mobility", self.mobility_percent),
            ("nutrition", self.nutrition_percent),
            ("consumption", self.consumption_percent),
        ]
    }
}

fn germany_average_kg() -> f64 {
    10_800.0
}

fn world_average_kg() -> f64 {
    4_800.0
}

fn paris_target_kg() -> f64 {
    2_000.0
}

/// Reference values the user's footprint is compared against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    #[serde(default)]
    pub user_total_kg: f64,
    #[serde(default = "germany_average_kg")]
    pub germany_average_kg: f64,
    #[serde(default = "world_average_kg")]
    pub world_average_kg: f64,
    #[serde(default = "paris_target_kg")]
    pub paris_target_kg: f64,

    #[serde(default)]
    pub vs_germany_percent: f64,
    #[serde(default)]
    pub vs_world_percent: f64,
    #[serde(default)]
    pub vs_paris_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: String,
    pub action: String,
    pub potential_savings_kg: f64,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub challenge_id: Option<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Outcome of a footprint calculation as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintResult {
    #[serde(default = "default_version")]
    pub calculation_version: String,
    #[serde(default)]
    pub calculated_at: Option<DateTime<Utc>>,

    pub total_co2_kg_year: f64,
    pub breakdown: Breakdown,
    pub comparison: Comparison,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,

    /// 0–10, higher is better.
    #[serde(default)]
    pub sec_score: Option<f64>,

    /// Set by the API when the result was stored against the user profile.
    #[serde(default)]
    pub profile_complete: bool,
}

impl FootprintResult {
    pub fn total_tonnes(&self) -> f64 {
        self.total_co2_kg_year / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn breakdown(h: f64, m: f64, n: f64, c: f64) -> Breakdown {
        Breakdown {
            housing_kg: 0.0,
            mobility_kg: 0.0,
            nutrition_kg: 0.0,
            consumption_kg: 0.0,
            total_kg: 0.0,
            housing_percent: h,
            mobility_percent: m,
            nutrition_percent: n,
            consumption_percent: c,
        }
    }

    #[test]
    fn breakdown_accepts_rounding_drift() {
        assert!(breakdown(25.1, 25.1, 25.1, 24.9).is_consistent());
        assert!(breakdown(33.3, 33.3, 33.3, 0.0).is_consistent());
    }

    #[test]
    fn breakdown_rejects_shares_far_from_hundred() {
        assert!(!breakdown(50.0, 50.0, 50.0, 0.0).is_consistent());
        assert!(!breakdown(0.0, 0.0, 0.0, 0.0).is_consistent());
    }

    #[test]
    fn result_deserializes_api_payload_with_defaults() {
        let payload = json!({
            "success": true,
            "calculation_version": "1.0",
            "calculated_at": "2025-03-01T10:00:00Z",
            "total_co2_kg_year": 8450.5,
            "breakdown": {
                "housing_kg": 2100.0, "mobility_kg": 1900.0,
                "nutrition_kg": 1850.5, "consumption_kg": 2600.0,
                "total_kg": 8450.5,
                "housing_percent": 24.9, "mobility_percent": 22.5,
                "nutrition_percent": 21.9, "consumption_percent": 30.7
            },
            "comparison": {
                "user_total_kg": 8450.5,
                "vs_germany_percent": -21.8,
                "vs_world_percent": 76.1,
                "vs_paris_percent": 322.5
            },
            "recommendations": [{
                "category": "nutrition",
                "action": "Try two meat-free days a week",
                "potential_savings_kg": 300.0,
                "difficulty": "easy",
                "challenge_id": "NU-1"
            }],
            "sec_score": 5.2
        });

        let result: FootprintResult = serde_json::from_value(payload).unwrap();

        assert_eq!(result.comparison.germany_average_kg, 10_800.0);
        assert_eq!(result.comparison.paris_target_kg, 2_000.0);
        assert_eq!(result.recommendations[0].difficulty, Difficulty::Easy);
        assert_eq!(result.sec_score, Some(5.2));
        assert!(!result.profile_complete);
        assert!(result.breakdown.is_consistent());
    }
}
