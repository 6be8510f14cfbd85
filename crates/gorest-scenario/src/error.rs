//! Scenario error types

use gorest_config::ConfigError;
use gorest_http::HttpError;
use thiserror::Error;

use crate::report::Step;

/// Result type for scenario steps
pub type Result<T> = std::result::Result<T, ScenarioError>;

/// Why a step failed
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The HTTP call itself failed; the original error is the source
    #[error("Failed to {operation}: {source}")]
    Http {
        operation: String,
        #[source]
        source: HttpError,
    },

    /// An expectation about the response did not hold
    #[error("{step}: {message}")]
    Assertion { step: Step, message: String },

    /// The step needs a created user and there is none
    #[error("{step}: no user was created earlier in this scenario")]
    UnmetPrecondition { step: Step },

    /// Configuration missing or invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Payload could not be encoded
    #[error("Failed to encode payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ScenarioError {
    pub(crate) fn http(operation: impl Into<String>, source: HttpError) -> Self {
        Self::Http {
            operation: operation.into(),
            source,
        }
    }

    pub(crate) fn assertion(step: Step, message: impl Into<String>) -> Self {
        Self::Assertion {
            step,
            message: message.into(),
        }
    }

    /// The underlying HTTP error, if the call failed on the wire
    pub fn http_error(&self) -> Option<&HttpError> {
        match self {
            Self::Http { source, .. } => Some(source),
            _ => None,
        }
    }
}
