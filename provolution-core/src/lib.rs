//! Domain model and wizard logic for the Provolution climate-footprint client.
//!
//! Everything here is I/O free apart from the service traits in [`api`],
//! which the HTTP crate implements.

pub mod api;
pub mod events;
pub mod models;
pub mod wizard;

pub use api::{ApiConfig, ApiError, ChallengeCompleter, FootprintService};
pub use events::{AppEvent, EventBus, EventSubscription, XpEarned};
pub use models::*;
