//! `provolution.toml` loading.
//!
//! Precedence, lowest first: built-in defaults, the config file, the
//! `PROVOLUTION_API_URL` environment variable, command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use provolution_core::ApiConfig;
use provolution_core::api::{DEFAULT_API_URL, LOCAL_API_URL};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "provolution.toml";
pub const API_URL_ENV: &str = "PROVOLUTION_API_URL";
const TOKEN_FILE_NAME: &str = ".provolution_token";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("request_timeout_secs must be greater than zero")]
    ZeroTimeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub api_url: String,
    pub app_name: String,
    /// Region used by `leaderboard --regional` when none is given.
    pub default_region: String,
    /// Where the bearer token is kept between runs. Defaults to
    /// `~/.provolution_token`.
    pub token_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            app_name: "Provolution".to_string(),
            default_region: "NRW".to_string(),
            token_file: None,
            log_file: None,
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from `provolution.toml` in the working directory
    /// when it exists. An explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)?
                } else {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            }
        };
        Ok(config.with_env_api_url(std::env::var(API_URL_ENV).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        config.validate()
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(self)
    }

    pub fn with_env_api_url(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.filter(|u| !u.trim().is_empty()) {
            debug!(env = API_URL_ENV, "API URL taken from environment");
            self.api_url = url;
        }
        self
    }

    /// Apply `--api-url` / `--local`. An explicit URL wins over `--local`.
    pub fn with_cli_overrides(mut self, api_url: Option<String>, local: bool) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        } else if local {
            self.api_url = LOCAL_API_URL.to_string();
        }
        self
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            timeout: Duration::from_secs(self.request_timeout_secs),
            ..ApiConfig::new(self.api_url.as_str())
        }
    }

    /// Token file location, or `None` to keep the token in memory only.
    pub fn token_path(&self) -> Option<PathBuf> {
        self.token_file.clone().or_else(|| {
            std::env::var_os("HOME").map(|home| PathBuf::from(home).join(TOKEN_FILE_NAME))
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(AppConfig::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let config = AppConfig::parse(
            r#"
            api_url = "https://staging.example.org/v1"
            default_region = "BY"
            log_file = "provolution.log"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url, "https://staging.example.org/v1");
        assert_eq!(config.default_region, "BY");
        assert_eq!(config.log_file, Some(PathBuf::from("provolution.log")));
        assert_eq!(config.api_config().timeout, Duration::from_secs(5));
        assert_eq!(config.app_name, "Provolution");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppConfig::parse("api_uri = \"typo\"").is_err());
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("provolution.toml");
        std::fs::write(&path, "request_timeout_secs = 0").unwrap();

        assert!(matches!(
            AppConfig::from_file(&path),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/provolution.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn cli_url_beats_env_and_local() {
        let config = AppConfig::default()
            .with_env_api_url(Some("https://env.example.org/v1".to_string()))
            .with_cli_overrides(Some("http://127.0.0.1:9000/v1".to_string()), true);

        assert_eq!(config.api_url, "http://127.0.0.1:9000/v1");
    }

    #[test]
    fn local_flag_selects_dev_server() {
        let config = AppConfig::default()
            .with_env_api_url(Some("https://env.example.org/v1".to_string()))
            .with_cli_overrides(None, true);

        assert_eq!(config.api_url, LOCAL_API_URL);
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let config = AppConfig::default().with_env_api_url(Some("  ".to_string()));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn explicit_token_file_wins() {
        let config = AppConfig {
            token_file: Some(PathBuf::from("/tmp/token")),
            ..Default::default()
        };
        assert_eq!(config.token_path(), Some(PathBuf::from("/tmp/token")));
    }
}
