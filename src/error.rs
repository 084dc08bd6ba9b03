use thiserror::Error;

use crate::validation::FieldErrors;

/// Failure of a request to the server
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Field errors sent back with a 4xx response
    #[error("Validation failed")]
    Invalid {
        errors: FieldErrors,
        message: Option<String>,
    },

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    Request(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}
