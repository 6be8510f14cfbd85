//! HTTP client error types

use std::fmt;

use thiserror::Error;

use crate::envelope::ResponseEnvelope;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// HTTP client errors
///
/// The variants are mutually exclusive: a request either got a non-2xx
/// response, never got a response at all, or was never sent.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Server answered with a non-2xx status
    #[error("HTTP {} {}: {}", .0.status().as_u16(), .0.status_text(), .0.text())]
    Response(Box<ResponseEnvelope>),

    /// No response received (timeout, DNS, connection reset)
    #[error("No response received: {0}")]
    Transport(#[source] reqwest::Error),

    /// Request could not be built
    #[error("Request setup failed: {0}")]
    Setup(String),
}

/// Which side of the wire a failure happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Response,
    Transport,
    Setup,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Response => write!(f, "response"),
            Self::Transport => write!(f, "transport"),
            Self::Setup => write!(f, "setup"),
        }
    }
}

impl HttpError {
    /// Failure category
    pub fn kind(&self) -> FailureKind {
        match self {
            HttpError::Response(_) => FailureKind::Response,
            HttpError::Transport(_) => FailureKind::Transport,
            HttpError::Setup(_) => FailureKind::Setup,
        }
    }

    /// The response, if the server sent one
    pub fn response(&self) -> Option<&ResponseEnvelope> {
        match self {
            HttpError::Response(response) => Some(response),
            _ => None,
        }
    }

    /// Status code, if the server sent a response
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        self.response().map(ResponseEnvelope::status)
    }

    /// Check if the request ran past the configured timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, HttpError::Transport(e) if e.is_timeout())
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            HttpError::Setup(e.to_string())
        } else {
            HttpError::Transport(e)
        }
    }
}
