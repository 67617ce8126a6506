use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Challenge that every new user completes by calculating a footprint.
pub const ONBOARDING_CHALLENGE_ID: &str = "ON-1";

/// XP credited when the server does not report an amount.
pub const DEFAULT_COMPLETION_XP: u32 = 50;

/// The signed-in user's participation state on a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipationStatus {
    Active,
    Completed,
    Abandoned,
}

impl ParticipationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeInfo {
    pub name: String,
    pub icon: String,
    #[serde(default)]
    pub tier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactInfo {
    pub co2_kg_year: f64,
    #[serde(default)]
    pub savings_euro_year: Option<f64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// Challenge as listed by `GET /challenges` and `GET /challenges/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub name_emoji: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub difficulty: String,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default)]
    pub xp_reward: u32,
    #[serde(default)]
    pub badge: Option<BadgeInfo>,
    #[serde(default)]
    pub impact: Option<ImpactInfo>,
    #[serde(default)]
    pub participants_count: u32,
    #[serde(default)]
    pub user_status: Option<ParticipationStatus>,
}

impl Challenge {
    pub fn is_completed(&self) -> bool {
        self.user_status == Some(ParticipationStatus::Completed)
    }

    pub fn is_active(&self) -> bool {
        self.user_status == Some(ParticipationStatus::Active)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChallengeList {
    pub challenges: Vec<Challenge>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
}

/// Query parameters accepted by `GET /challenges`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChallengeFilter {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ChallengeFilter {
    /// Non-empty filters as query pairs, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = &self.category {
            pairs.push(("category", category.clone()));
        }
        if let Some(difficulty) = &self.difficulty {
            pairs.push(("difficulty", difficulty.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status", status.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserChallenge {
    pub id: i64,
    pub challenge_id: String,
    pub status: ParticipationStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub progress_percent: u32,
    #[serde(default)]
    pub days_completed: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JoinResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user_challenge: Option<UserChallenge>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Completion {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub xp_earned: Option<u32>,
    #[serde(default)]
    pub badge_earned: Option<BadgeInfo>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Completion {
    /// XP to credit: the server's figure, else the challenge reward, else
    /// [`DEFAULT_COMPLETION_XP`].
    pub fn xp_or(&self, challenge: Option<&Challenge>) -> u32 {
        self.xp_earned
            .filter(|xp| *xp > 0)
            .or_else(|| challenge.map(|c| c.xp_reward).filter(|xp| *xp > 0))
            .unwrap_or(DEFAULT_COMPLETION_XP)
    }
}
