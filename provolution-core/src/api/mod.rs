pub mod config;
pub mod service;

pub use config::{ApiConfig, DEFAULT_API_URL, LOCAL_API_URL};
pub use service::{ApiError, ChallengeCompleter, FootprintService};
