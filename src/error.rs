//! Error types for gitlab-requester
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Only the rate-limit case is ever handled inside the crate; everything
//! else reaches the caller as the executor reported it.

use thiserror::Error;

/// The main error type for gitlab-requester
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Missing credential or bad option
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// Base URL did not parse
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Options file is not valid YAML
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Body or record decoding failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response other than a retryable 429
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// 429 with a numeric `retry-after`
    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited {
        /// Seconds the server asked us to wait
        retry_after_seconds: u64,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// File read failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Server-requested wait, if this error is a rate-limit response
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Error::RateLimited {
                retry_after_seconds,
            } => Some(*retry_after_seconds),
            _ => None,
        }
    }

    /// Check if the fetch loop may sleep and reissue the request
    pub fn is_rate_limit(&self) -> bool {
        self.retry_after().is_some()
    }

    /// HTTP status carried by this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::RateLimited { .. } => Some(429),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for gitlab-requester
pub type Result<T> = std::result::Result<T, Error>;
