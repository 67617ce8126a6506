use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Challenge, Completion, FootprintAnswers, FootprintResult, JoinResponse};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Could not connect to server: {0}")]
    Network(String),

    /// The server rejected the bearer token the client sent.
    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    #[error(
        "Server responded with status {status}: {}",
        message.as_deref().unwrap_or("no details")
    )]
    Status {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },

    /// A success response whose body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }

    /// Human-readable message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Unauthorized(message) => Some(message),
            Self::Network(_) | Self::Decode(_) => None,
        }
    }
}

/// Remote footprint scoring.
///
/// Both operations take the full answer record and return the same result
/// shape; `save` additionally stores the snapshot against the signed-in user.
#[async_trait]
pub trait FootprintService: Send + Sync {
    /// `POST /footprint/calculate`, no account required.
    async fn calculate(&self, answers: &FootprintAnswers) -> Result<FootprintResult, ApiError>;

    /// `POST /footprint/me`, requires a bearer token.
    async fn save(&self, answers: &FootprintAnswers) -> Result<FootprintResult, ApiError>;
}

/// The slice of the challenges API the wizard needs for onboarding.
#[async_trait]
pub trait ChallengeCompleter: Send + Sync {
    /// Look up a challenge including the user's status on it.
    /// Returns `Ok(None)` when the id is unknown to the server.
    async fn challenge(&self, id: &str) -> Result<Option<Challenge>, ApiError>;

    async fn join(&self, id: &str) -> Result<JoinResponse, ApiError>;

    async fn complete(&self, id: &str) -> Result<Completion, ApiError>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::ApiError;

    #[test]
    fn status_error_names_server_message() {
        let err = ApiError::Status {
            status: 422,
            code: Some("VALIDATION_ERROR".to_string()),
            message: Some("housing_size_sqm too large".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Server responded with status 422: housing_size_sqm too large"
        );
        assert_eq!(err.server_message(), Some("housing_size_sqm too large"));
    }

    #[test]
    fn network_error_has_no_status() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn status_error_without_message() {
        let err = ApiError::Status {
            status: 404,
            code: None,
            message: None,
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Server responded with status 404: no details");
    }
}
