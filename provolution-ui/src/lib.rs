pub mod app;
pub mod config;
pub mod logging;
pub mod utils;
pub mod views;

pub use app::{App, Command};
pub use config::{AppConfig, ConfigError};
