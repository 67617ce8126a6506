//! Text views of the terminal client.
//!
//! - `wizard_view` - the interactive footprint wizard
//! - `auth` - sign in, registration, profile
//! - `challenges` - challenge list, join and completion
//! - `leaderboard` - rankings
//! - `status_bar` - command hints under wizard pages

pub mod auth;
pub mod challenges;
pub mod leaderboard;
pub mod status_bar;
pub mod wizard_view;

pub use auth::AuthView;
pub use challenges::ChallengesView;
pub use leaderboard::LeaderboardView;
pub use wizard_view::{ViewOutcome, WizardServices, WizardView};
