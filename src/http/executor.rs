//! HTTP executors
//!
//! The `HttpExecutor` trait is the seam between request construction and the
//! network. `ReqwestExecutor` is the production implementation; it handles
//! the transport and classifies non-2xx statuses into errors:
//! - 429 with a numeric `retry-after` becomes `Error::RateLimited`
//! - any other non-2xx becomes `Error::HttpStatus`
//! - transport failures become `Error::Http`

use super::rate_limit::parse_retry_after;
use super::request::{RequestBody, RequestDescriptor};
use crate::error::{Error, Result};
use crate::types::{HeaderPairs, JsonValue, ResponseType};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

/// A decoded HTTP response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Response headers, names lowercased
    pub headers: HeaderPairs,
    /// Decoded body (`Null` for an empty body)
    pub body: JsonValue,
}

impl HttpResponse {
    /// Create a 200 response with the given body
    pub fn ok(body: JsonValue) -> Self {
        Self {
            status: 200,
            headers: HeaderPairs::new(),
            body,
        }
    }

    /// Add a header (name is lowercased)
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Look up a header by case-insensitive name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Look up a header and parse it as an unsigned number
    ///
    /// Empty values (GitLab sends `x-next-page: ""` on the last page) are
    /// treated as absent.
    pub fn header_u32(&self, name: &str) -> Option<u32> {
        self.header(name)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .and_then(|v| v.parse().ok())
    }
}

/// Executes request descriptors
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    /// Run one request; non-2xx statuses are returned as errors
    async fn execute(&self, request: &RequestDescriptor) -> Result<HttpResponse>;
}

/// Configuration for the reqwest executor
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("gitlab-requester/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ExecutorConfig {
    /// Create a new config builder
    pub fn builder() -> ExecutorConfigBuilder {
        ExecutorConfigBuilder::default()
    }
}

/// Builder for executor config
#[derive(Default)]
pub struct ExecutorConfigBuilder {
    config: ExecutorConfig,
}

impl ExecutorConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ExecutorConfig {
        self.config
    }
}

/// Executor backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: Client,
    config: ExecutorConfig,
}

impl ReqwestExecutor {
    /// Create an executor with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ExecutorConfig::default())
    }

    /// Create an executor with custom configuration
    pub fn with_config(config: ExecutorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the executor configuration
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: &RequestDescriptor) -> Result<HttpResponse> {
        let mut req = self
            .client
            .request(request.method.into(), request.url.as_str());

        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !request.query.is_empty() {
            req = req.query(&request.query);
        }

        match &request.body {
            RequestBody::Empty => {}
            RequestBody::Json(body) => req = req.json(body),
            RequestBody::Form(fields) => req = req.form(fields),
        }

        let response = req.send().await?;
        let status = response.status();
        let headers = lowercase_headers(response.headers());

        if status == StatusCode::TOO_MANY_REQUESTS {
            if let Some(retry_after_seconds) =
                headers.get("retry-after").and_then(|v| parse_retry_after(v))
            {
                return Err(Error::RateLimited {
                    retry_after_seconds,
                });
            }
        }

        if !status.is_success() {
            let body = response.text().await?;
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let body = match request.response_type {
            ResponseType::Json if text.trim().is_empty() => JsonValue::Null,
            ResponseType::Json => serde_json::from_str(&text)?,
            ResponseType::Text => JsonValue::String(text),
        };

        debug!("Request succeeded: {} {} -> {}", request.method, request.url, status);

        Ok(HttpResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

fn lowercase_headers(headers: &HeaderMap) -> HeaderPairs {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
        })
        .collect()
}
