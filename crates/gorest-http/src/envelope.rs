//! Request and response envelopes shared by the client and its observers

use std::{
    borrow::Cow,
    time::{Duration, Instant},
};

use reqwest::{header::HeaderMap, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Everything known about a request at dispatch time.
///
/// Built once per call, handed to every observer, dropped when the call
/// completes.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// Fully resolved URL (without query string)
    pub url: String,
    /// Default headers with per-call headers merged over them
    pub headers: HeaderMap,
    /// JSON body, if any
    pub body: Option<Value>,
    /// Query parameters in the order given
    pub params: Vec<(String, String)>,
    /// Captured immediately before dispatch
    pub started_at: Instant,
}

impl RequestDescriptor {
    /// Time since the request was started
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// A received response with its measured latency
#[derive(Debug, Clone)]
pub struct ResponseEnvelope {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    started_at: Instant,
    finished_at: Instant,
}

impl ResponseEnvelope {
    /// Create an envelope from raw parts
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Vec<u8>,
        started_at: Instant,
        finished_at: Instant,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            started_at,
            finished_at,
        }
    }

    /// Returns the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Canonical reason phrase, empty for unknown codes.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Returns true if the status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// True when the body is empty or only whitespace
    pub fn is_empty_body(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_slice(&self.body)
    }

    /// Parsed JSON body, `None` for an empty body.
    pub fn data(&self) -> serde_json::Result<Option<Value>> {
        if self.is_empty_body() {
            Ok(None)
        } else {
            self.json().map(Some)
        }
    }

    /// When the request was started
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// When the full response body had been received
    pub fn finished_at(&self) -> Instant {
        self.finished_at
    }

    /// Elapsed time between request start and response receipt
    pub fn latency(&self) -> Duration {
        self.finished_at.saturating_duration_since(self.started_at)
    }
}
