//! Observable HTTP client for API test automation
//!
//! Wraps `reqwest` with one configured base URL, default headers and timeout,
//! and reports every call to a set of [`RequestObserver`]s.
//!
//! ## Features
//!
//! - **Trait-based design**: Mockable via `HttpClientTrait`
//! - **Observers**: Request/response hooks with latency measurement
//! - **Error taxonomy**: Response, transport and setup failures kept apart
//! - **Testing support**: Easy mocking with mockito

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod observer;

pub use client::{shared_client, HttpClient, HttpClientTrait};
pub use config::HttpConfig;
pub use envelope::{RequestDescriptor, ResponseEnvelope};
pub use error::{FailureKind, HttpError, Result};
pub use observer::{LoggingObserver, RequestObserver};

/// Re-export commonly used types
pub use reqwest::{header, Method, StatusCode};
