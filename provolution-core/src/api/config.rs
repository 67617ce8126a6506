use std::time::Duration;

/// Production API, hosted on Render.
pub const DEFAULT_API_URL: &str = "https://provolution-api.onrender.com/v1";

/// API started locally with the development server.
pub const LOCAL_API_URL: &str = "http://localhost:8001/v1";

/// Connection settings for an API client.
///
/// `base_url` includes the version prefix; endpoint paths such as
/// `/footprint/calculate` are appended to it unchanged.
///
/// | environment | base_url                                  |
/// |-------------|-------------------------------------------|
/// | production  | `https://provolution-api.onrender.com/v1` |
/// | local       | `http://localhost:8001/v1`                |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn local() -> Self {
        Self::new(LOCAL_API_URL)
    }

    /// Full URL of an endpoint path (`/footprint/me` → `<base>/footprint/me`).
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// URL of the unversioned health probe.
    ///
    /// The probe lives next to the version prefix, so `/v1` is stripped.
    pub fn health_url(&self) -> String {
        let root = self.base_url.strip_suffix("/v1").unwrap_or(&self.base_url);
        format!("{root}/health")
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_points_at_production() {
        assert_eq!(ApiConfig::default().base_url, DEFAULT_API_URL);
    }

    #[test]
    fn new_strips_trailing_slash() {
        let config = ApiConfig::new("http://127.0.0.1:9000/v1/");
        assert_eq!(config.base_url, "http://127.0.0.1:9000/v1");
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let config = ApiConfig::local();
        assert_eq!(
            config.endpoint("/footprint/calculate"),
            "http://localhost:8001/v1/footprint/calculate"
        );
        assert_eq!(
            config.endpoint("challenges/ON-1/join"),
            "http://localhost:8001/v1/challenges/ON-1/join"
        );
    }

    #[test]
    fn health_url_drops_version_prefix() {
        assert_eq!(ApiConfig::local().health_url(), "http://localhost:8001/health");
        assert_eq!(
            ApiConfig::new("http://example.test/api").health_url(),
            "http://example.test/api/health"
        );
    }
}
