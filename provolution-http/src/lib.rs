//! HTTP implementation of the Provolution service traits.

mod client;
mod session;

pub use client::ApiClient;
pub use session::{Session, SessionError};
