//! Request descriptors
//!
//! A `RequestDescriptor` is the complete description of one HTTP call. It is
//! created per call, handed to an executor, and dropped.

use crate::casing::decamelize;
use crate::types::{HeaderPairs, JsonObject, JsonValue, Method, ResponseType};

/// Payload of a request
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON body
    Json(JsonValue),
    /// `application/x-www-form-urlencoded` body
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Check if there is no payload
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// One HTTP call described as plain data
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// Fully joined URL
    pub url: String,
    /// Request headers (auth included)
    pub headers: HeaderPairs,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// Request payload
    pub body: RequestBody,
    /// How to decode the response body
    pub response_type: ResponseType,
}

impl RequestDescriptor {
    /// Create a descriptor with no headers, query or body
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderPairs::new(),
            query: Vec::new(),
            body: RequestBody::Empty,
            response_type: ResponseType::Json,
        }
    }

    /// Merge headers, later values win
    #[must_use]
    pub fn headers(mut self, headers: &HeaderPairs) -> Self {
        for (key, value) in headers {
            self.headers.insert(key.clone(), value.clone());
        }
        self
    }

    /// Add a single query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add query parameters from a JSON object (keys converted to snake_case)
    #[must_use]
    pub fn query_object(mut self, params: &JsonObject) -> Self {
        self.query.extend(query_pairs(params));
        self
    }

    /// Set a JSON body
    #[must_use]
    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Set a form body from a JSON object; field names are sent as given
    #[must_use]
    pub fn form(mut self, fields: &JsonObject) -> Self {
        self.body = RequestBody::Form(flatten(fields, &str::to_string));
        self
    }

    /// Set the expected response type
    #[must_use]
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = response_type;
        self
    }
}

/// Flatten a JSON object into `key=value` pairs with snake_case keys
///
/// Arrays expand to repeated `key[]` entries, `null` values are dropped and
/// nested objects are sent as their JSON text.
pub fn query_pairs(params: &JsonObject) -> Vec<(String, String)> {
    flatten(params, &decamelize)
}

fn flatten(params: &JsonObject, rename: &dyn Fn(&str) -> String) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());

    for (key, value) in params {
        let key = rename(key);
        match value {
            JsonValue::Null => {}
            JsonValue::Array(items) => {
                let array_key = format!("{key}[]");
                for item in items {
                    if let Some(s) = scalar_to_string(item) {
                        pairs.push((array_key.clone(), s));
                    }
                }
            }
            other => {
                if let Some(s) = scalar_to_string(other) {
                    pairs.push((key, s));
                }
            }
        }
    }

    pairs
}

fn scalar_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Join a base URL and a path with exactly one `/` between them
///
/// Absolute `http://` / `https://` paths are returned unchanged.
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{base}/{path}")
}
