//! Request observers
//!
//! Observers are handed to the client at construction and are told about
//! every request: once before dispatch, then exactly once with either the
//! response or the error. They only watch; the result reaches the caller
//! untouched.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, AUTHORIZATION};
use serde_json::Value;
use tracing::{error, info};

use crate::{
    envelope::{RequestDescriptor, ResponseEnvelope},
    error::HttpError,
};

/// Hook notified around every request
pub trait RequestObserver: Send + Sync {
    /// Called before the request is dispatched
    fn on_request(&self, _request: &RequestDescriptor) {}

    /// Called after a 2xx response has been received
    fn on_response(&self, _request: &RequestDescriptor, _response: &ResponseEnvelope) {}

    /// Called when the request failed for any reason
    fn on_error(&self, _request: &RequestDescriptor, _error: &HttpError) {}
}

/// Logs requests, responses and failures through `tracing`
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    redact_auth: bool,
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self { redact_auth: true }
    }
}

impl LoggingObserver {
    /// Create a logging observer that hides bearer tokens
    pub fn new() -> Self {
        Self::default()
    }

    /// Log `Authorization` values verbatim
    pub fn with_auth_visible(mut self) -> Self {
        self.redact_auth = false;
        self
    }

    fn headers(&self, headers: &HeaderMap) -> BTreeMap<String, String> {
        loggable_headers(headers, self.redact_auth)
    }
}

impl RequestObserver for LoggingObserver {
    fn on_request(&self, request: &RequestDescriptor) {
        info!(
            method = %request.method,
            url = %request.url,
            headers = ?self.headers(&request.headers),
            "--- API Request ---"
        );
        if let Some(body) = &request.body {
            info!(payload = %pretty(body), "Request payload");
        }
        if !request.params.is_empty() {
            info!(params = ?request.params, "Request params");
        }
    }

    fn on_response(&self, _request: &RequestDescriptor, response: &ResponseEnvelope) {
        info!(
            status = response.status().as_u16(),
            status_text = response.status_text(),
            latency_ms = response.latency().as_millis() as u64,
            body = %pretty_body(response),
            "--- API Response ---"
        );
    }

    fn on_error(&self, request: &RequestDescriptor, err: &HttpError) {
        match err {
            HttpError::Response(response) => error!(
                kind = %err.kind(),
                status = response.status().as_u16(),
                status_text = response.status_text(),
                latency_ms = response.latency().as_millis() as u64,
                body = %pretty_body(response),
                "--- API Error Response ---"
            ),
            HttpError::Transport(e) => error!(
                kind = %err.kind(),
                url = %request.url,
                latency_ms = request.elapsed().as_millis() as u64,
                timeout = e.is_timeout(),
                error = %e,
                "No response received"
            ),
            HttpError::Setup(message) => error!(
                kind = %err.kind(),
                url = %request.url,
                error = %message,
                "Request setup error"
            ),
        }
    }
}

/// Header map as printable strings, optionally masking credentials
pub fn loggable_headers(headers: &HeaderMap, redact_auth: bool) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = match value.to_str() {
                Ok(v) if redact_auth && *name == AUTHORIZATION => match v.split_once(' ') {
                    Some((scheme, _)) => format!("{scheme} ***"),
                    None => "***".to_string(),
                },
                Ok(v) => v.to_string(),
                Err(_) => "<non-ascii>".to_string(),
            };
            (name.as_str().to_string(), value)
        })
        .collect()
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn pretty_body(response: &ResponseEnvelope) -> String {
    match response.data() {
        Ok(Some(value)) => pretty(&value),
        Ok(None) => String::new(),
        Err(_) => response.text().into_owned(),
    }
}
