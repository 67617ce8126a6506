use thiserror::Error;

use crate::api::ApiError;

/// Shown when the server rejects a calculation without saying why.
pub const GENERIC_CALCULATION_FAILURE: &str = "Calculation failed";

/// Why the terminal step has no result.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CalculationError {
    #[error("{0}")]
    Network(String),

    /// Non-success response; `message` is the server's text when it sent one.
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },

    /// The response arrived but does not satisfy the result invariants.
    #[error("Invalid calculation result: {0}")]
    InvalidResult(String),
}

impl From<ApiError> for CalculationError {
    fn from(err: ApiError) -> Self {
        match &err {
            ApiError::Network(_) => Self::Network(err.to_string()),
            ApiError::Decode(detail) => Self::InvalidResult(detail.clone()),
            ApiError::Unauthorized(_) | ApiError::Status { .. } => Self::Rejected {
                status: err.status(),
                message: err
                    .server_message()
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or(GENERIC_CALCULATION_FAILURE)
                    .to_string(),
            },
        }
    }
}

/// A known field received a value its control cannot produce.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("'{value}' is not a valid choice for {field}; expected one of: {}", options.join(", "))]
    InvalidChoice {
        field: &'static str,
        value: String,
        options: Vec<&'static str>,
    },

    #[error("'{value}' is not a yes/no value for {field}")]
    InvalidToggle { field: &'static str, value: String },

    #[error("'{value}' is not a number for {field}")]
    InvalidNumber { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn rejected_carries_server_message() {
        let err = CalculationError::from(ApiError::Status {
            status: 500,
            code: Some("INTERNAL_ERROR".to_string()),
            message: Some("Database unavailable".to_string()),
        });
        assert_eq!(
            err,
            CalculationError::Rejected {
                status: Some(500),
                message: "Database unavailable".to_string(),
            }
        );
    }

    #[test]
    fn rejected_without_message_uses_generic_text() {
        let err = CalculationError::from(ApiError::Status {
            status: 502,
            code: None,
            message: None,
        });
        assert_eq!(err.to_string(), GENERIC_CALCULATION_FAILURE);
    }

    #[test]
    fn network_failure_stays_network() {
        let err = CalculationError::from(ApiError::Network("dns error".to_string()));
        assert!(matches!(err, CalculationError::Network(_)));
        assert_eq!(err.to_string(), "Could not connect to server: dns error");
    }
}
