//! HTTP client implementation

use std::{sync::Arc, time::Instant};

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Method,
};
use serde_json::Value;

use crate::{
    config::HttpConfig,
    envelope::{RequestDescriptor, ResponseEnvelope},
    error::{HttpError, Result},
    observer::{LoggingObserver, RequestObserver},
};

/// Mockable HTTP client trait
///
/// Paths are resolved against the configured base URL. Per-call headers
/// override default headers with the same name.
#[async_trait]
pub trait HttpClientTrait: Send + Sync {
    /// Execute a GET request
    async fn get(
        &self,
        path: &str,
        headers: &HeaderMap,
        params: &[(&str, &str)],
    ) -> Result<ResponseEnvelope>;

    /// Execute a POST request
    async fn post(&self, path: &str, body: &Value, headers: &HeaderMap)
        -> Result<ResponseEnvelope>;

    /// Execute a PUT request
    async fn put(&self, path: &str, body: &Value, headers: &HeaderMap) -> Result<ResponseEnvelope>;

    /// Execute a PATCH request
    async fn patch(
        &self,
        path: &str,
        body: &Value,
        headers: &HeaderMap,
    ) -> Result<ResponseEnvelope>;

    /// Execute a DELETE request
    async fn delete(&self, path: &str, headers: &HeaderMap) -> Result<ResponseEnvelope>;

    /// Execute a custom HTTP request
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
        params: &[(&str, &str)],
    ) -> Result<ResponseEnvelope>;
}

/// Production HTTP client
pub struct HttpClient {
    inner: reqwest::Client,
    config: HttpConfig,
    default_headers: HeaderMap,
    observers: Vec<Arc<dyn RequestObserver>>,
}

impl HttpClient {
    /// Create a new HTTP client that logs every call
    pub fn new(config: HttpConfig) -> Result<Self> {
        Self::with_observers(config, vec![Arc::new(LoggingObserver::default())])
    }

    /// Create a client notifying exactly the given observers
    pub fn with_observers(
        config: HttpConfig,
        observers: Vec<Arc<dyn RequestObserver>>,
    ) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(HttpError::Setup("base URL is required".to_string()));
        }
        url::Url::parse(&config.base_url)
            .map_err(|e| HttpError::Setup(format!("Invalid base URL `{}`: {e}", config.base_url)))?;

        let default_headers = header_map(&config)?;

        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent);

        if let Some(proxy_url) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy_url)
                .map_err(|e| HttpError::Setup(format!("Invalid proxy configuration: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder
            .build()
            .map_err(|e| HttpError::Setup(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner,
            config,
            default_headers,
            observers,
        })
    }

    /// Attach another observer
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Get configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Full URL for a path. Absolute URLs pass through unchanged.
    pub fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }

    fn merge_headers(&self, headers: &HeaderMap) -> HeaderMap {
        let mut merged = self.default_headers.clone();
        merged.extend(headers.clone());
        merged
    }

    async fn dispatch(&self, request: &RequestDescriptor) -> Result<ResponseEnvelope> {
        let url = url::Url::parse(&request.url)
            .map_err(|e| HttpError::Setup(format!("Invalid URL `{}`: {e}", request.url)))?;

        let mut builder = self
            .inner
            .request(request.method.clone(), url)
            .headers(request.headers.clone());

        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        let envelope =
            ResponseEnvelope::new(status, headers, body, request.started_at, Instant::now());

        if envelope.is_success() {
            Ok(envelope)
        } else {
            Err(HttpError::Response(Box::new(envelope)))
        }
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get(
        &self,
        path: &str,
        headers: &HeaderMap,
        params: &[(&str, &str)],
    ) -> Result<ResponseEnvelope> {
        self.request(Method::GET, path, None, headers, params).await
    }

    async fn post(
        &self,
        path: &str,
        body: &Value,
        headers: &HeaderMap,
    ) -> Result<ResponseEnvelope> {
        self.request(Method::POST, path, Some(body), headers, &[]).await
    }

    async fn put(&self, path: &str, body: &Value, headers: &HeaderMap) -> Result<ResponseEnvelope> {
        self.request(Method::PUT, path, Some(body), headers, &[]).await
    }

    async fn patch(
        &self,
        path: &str,
        body: &Value,
        headers: &HeaderMap,
    ) -> Result<ResponseEnvelope> {
        self.request(Method::PATCH, path, Some(body), headers, &[]).await
    }

    async fn delete(&self, path: &str, headers: &HeaderMap) -> Result<ResponseEnvelope> {
        self.request(Method::DELETE, path, None, headers, &[]).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        headers: &HeaderMap,
        params: &[(&str, &str)],
    ) -> Result<ResponseEnvelope> {
        let descriptor = RequestDescriptor {
            method,
            url: self.resolve_url(path),
            headers: self.merge_headers(headers),
            body: body.cloned(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            started_at: Instant::now(),
        };

        for observer in &self.observers {
            observer.on_request(&descriptor);
        }

        let result = self.dispatch(&descriptor).await;

        match &result {
            Ok(response) => {
                for observer in &self.observers {
                    observer.on_response(&descriptor, response);
                }
            }
            Err(e) => {
                for observer in &self.observers {
                    observer.on_error(&descriptor, e);
                }
            }
        }

        result
    }
}

fn header_map(config: &HttpConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (name, value) in &config.default_headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| HttpError::Setup(format!("Invalid header name `{name}`: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| HttpError::Setup(format!("Invalid value for header `{name}`: {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Create a shared HTTP client (Arc-wrapped for cloning)
pub fn shared_client(config: HttpConfig) -> Result<Arc<dyn HttpClientTrait>> {
    Ok(Arc::new(HttpClient::new(config)?))
}
