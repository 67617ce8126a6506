use chrono::NaiveDate;
use serde::Deserialize;

use super::UserBrief;

/// Which ranking to fetch from `/leaderboards`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardScope {
    Weekly,
    Monthly,
    Regional(String),
}

impl LeaderboardScope {
    /// Path below `/leaderboards`.
    pub fn path(&self) -> String {
        match self {
            Self::Weekly => "weekly".to_string(),
            Self::Monthly => "monthly".to_string(),
            Self::Regional(region) => format!("regional/{region}"),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::Weekly => "Weekly leaderboard".to_string(),
            Self::Monthly => "Monthly leaderboard".to_string(),
            Self::Regional(region) => format!("Leaderboard {region}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeaderboardPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

fn default_metric() -> String {
    "co2_kg".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user: UserBrief,
    pub score: f64,
    #[serde(default = "default_metric")]
    pub metric: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MyRank {
    pub rank: u32,
    pub score: f64,
    pub users_above: u32,
    pub users_below: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Leaderboard {
    pub period: LeaderboardPeriod,
    pub rankings: Vec<LeaderboardEntry>,
    #[serde(default)]
    pub my_rank: Option<MyRank>,
}
