mod answers;
mod challenge;
mod factors;
mod leaderboard;
mod result;
mod user;

pub use answers::{
    ConsumptionAnswers, DietType, FootprintAnswers, FuelType, HeatingType, HousingAnswers,
    HousingType, Level, MobilityAnswers, NutritionAnswers, ShoppingFrequency,
};
pub use challenge::{
    BadgeInfo, Challenge, ChallengeFilter, ChallengeList, Completion, DEFAULT_COMPLETION_XP,
    ImpactInfo, JoinResponse, ONBOARDING_CHALLENGE_ID, ParticipationStatus, UserChallenge,
};
pub use factors::{EmissionFactors, FactorSource};
pub use leaderboard::{Leaderboard, LeaderboardEntry, LeaderboardPeriod, LeaderboardScope, MyRank};
pub use result::{
    BREAKDOWN_TOLERANCE_PERCENT, Breakdown, Comparison, Difficulty, FootprintResult,
    Recommendation,
};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User, UserBrief, UserStats};
