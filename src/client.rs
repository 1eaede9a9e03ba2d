//! Client context
//!
//! A `ClientContext` pairs the API base URL and auth headers with an HTTP
//! executor. It is immutable once built and cheap to clone, so one context
//! can serve concurrent calls from many tasks.

use crate::auth::{AuthConfig, Authenticator};
use crate::casing::{camelize_keys, decamelize_keys};
use crate::config::ClientOptions;
use crate::error::{Error, Result};
use crate::http::{
    join_url, ExecutorConfig, HttpExecutor, HttpResponse, ReqwestExecutor, RequestDescriptor,
    RetryPolicy,
};
use crate::pagination::{fetch_paginated, page_stream, Page, PageResult, PaginationOptions};
use crate::types::{HeaderPairs, JsonObject, JsonValue, Method};
use futures::Stream;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Base URL, credentials and executor shared by every call
#[derive(Clone)]
pub struct ClientContext {
    base_url: String,
    auth: Authenticator,
    executor: Arc<dyn HttpExecutor>,
    retry: RetryPolicy,
    camelize: bool,
}

impl ClientContext {
    /// Build a context backed by a reqwest executor
    pub fn new(options: ClientOptions) -> Result<Self> {
        let executor = ReqwestExecutor::with_config(
            ExecutorConfig::builder()
                .timeout(Duration::from_secs(options.timeout_seconds))
                .build(),
        )?;
        Self::with_executor(options, Arc::new(executor))
    }

    /// Build a context around a custom executor
    ///
    /// Fails with a configuration error when neither `token` nor
    /// `oauth_token` is set, and with `InvalidUrl` for a bad host URL.
    pub fn with_executor(options: ClientOptions, executor: Arc<dyn HttpExecutor>) -> Result<Self> {
        let auth = AuthConfig::from_tokens(options.token.as_deref(), options.oauth_token.as_deref())?;

        let host = Url::parse(&options.url)?;
        if !matches!(host.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "unsupported URL scheme '{}' in '{}'",
                host.scheme(),
                options.url
            )));
        }

        let base_url = join_url(&join_url(&options.url, "api"), &options.version);
        debug!("Client for {} using {} auth", base_url, auth.kind());

        Ok(Self {
            base_url,
            auth: Authenticator::new(auth),
            executor,
            retry: options.retry,
            camelize: options.camelize,
        })
    }

    /// API base URL, e.g. `https://gitlab.com/api/v4`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Auth headers attached to every request
    pub fn headers(&self) -> &HeaderPairs {
        self.auth.headers()
    }

    /// Rate-limit retry policy used by paginated GETs
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    // ========================================================================
    // Request construction
    // ========================================================================

    /// Descriptor for `endpoint` with the base URL joined and auth applied
    pub fn request(&self, method: Method, endpoint: &str) -> RequestDescriptor {
        let mut request = RequestDescriptor::new(method, join_url(&self.base_url, endpoint));
        self.auth.apply(&mut request);
        request
    }

    /// GET descriptor with snake_case query parameters
    pub fn get_request(&self, endpoint: &str, query: &JsonObject) -> RequestDescriptor {
        self.request(Method::GET, endpoint).query_object(query)
    }

    /// GET descriptor for a `next` link
    ///
    /// The link already carries the query string, so nothing is re-added.
    pub fn follow_request(&self, link: &str) -> RequestDescriptor {
        let endpoint = link.strip_prefix(self.base_url.as_str()).unwrap_or(link);
        self.request(Method::GET, endpoint)
    }

    /// Descriptor with a JSON body whose keys are converted to snake_case
    ///
    /// `null` and empty objects send no body.
    pub fn body_request(&self, method: Method, endpoint: &str, body: JsonValue) -> RequestDescriptor {
        let request = self.request(method, endpoint);
        if is_empty_payload(&body) {
            return request;
        }
        request.json(decamelize_keys(body))
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Run a request once
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<HttpResponse> {
        debug!("{} {}", request.method, request.url);
        self.executor.execute(request).await
    }

    /// Run a request, sleeping and retrying while rate limited
    pub async fn execute_with_backoff(&self, request: &RequestDescriptor) -> Result<HttpResponse> {
        debug!("{} {}", request.method, request.url);
        self.retry.execute(self.executor.as_ref(), request).await
    }

    /// Turn a page body into typed records
    ///
    /// Arrays yield their elements, `null` yields nothing, and any other
    /// value is a single record.
    pub fn decode_records<T: DeserializeOwned>(&self, body: JsonValue) -> Result<Vec<T>> {
        let body = if self.camelize {
            camelize_keys(body)
        } else {
            body
        };

        let items = match body {
            JsonValue::Array(items) => items,
            JsonValue::Null => Vec::new(),
            other => vec![other],
        };

        items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(Error::from))
            .collect()
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Paginated GET; see [`fetch_paginated`]
    pub async fn get<T>(&self, endpoint: &str, options: &PaginationOptions) -> Result<PageResult<T>>
    where
        T: DeserializeOwned + Send,
    {
        fetch_paginated(self, endpoint, options).await
    }

    /// Lazy page stream; see [`page_stream`]
    pub fn pages<'a, T>(
        &'a self,
        endpoint: &str,
        options: &PaginationOptions,
    ) -> impl Stream<Item = Result<Page<T>>> + Send + 'a
    where
        T: DeserializeOwned + Send + 'a,
    {
        page_stream(self, endpoint, options)
    }

    /// POST a JSON body
    pub async fn post(&self, endpoint: &str, body: JsonValue) -> Result<JsonValue> {
        let request = self.body_request(Method::POST, endpoint, body);
        self.mutate(&request).await
    }

    /// POST url-encoded form fields
    pub async fn post_form(&self, endpoint: &str, fields: &JsonObject) -> Result<JsonValue> {
        let request = self.request(Method::POST, endpoint).form(fields);
        self.mutate(&request).await
    }

    /// PUT a JSON body
    pub async fn put(&self, endpoint: &str, body: JsonValue) -> Result<JsonValue> {
        let request = self.body_request(Method::PUT, endpoint, body);
        self.mutate(&request).await
    }

    /// DELETE, optionally with a JSON body
    pub async fn delete(&self, endpoint: &str, body: JsonValue) -> Result<JsonValue> {
        let request = self.body_request(Method::DELETE, endpoint, body);
        self.mutate(&request).await
    }

    async fn mutate(&self, request: &RequestDescriptor) -> Result<JsonValue> {
        let response = self.execute(request).await?;
        if self.camelize {
            return Ok(camelize_keys(response.body));
        }
        Ok(response.body)
    }
}

fn is_empty_payload(body: &JsonValue) -> bool {
    match body {
        JsonValue::Null => true,
        JsonValue::Object(map) => map.is_empty(),
        _ => false,
    }
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("base_url", &self.base_url)
            .field("auth", self.auth.config())
            .field("retry", &self.retry)
            .field("camelize", &self.camelize)
            .finish_non_exhaustive()
    }
}
