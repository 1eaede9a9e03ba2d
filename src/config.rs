//! Client configuration
//!
//! `ClientOptions` can be built in code, loaded from a YAML file, and
//! overlaid with `GITLAB_*` environment variables.
//!
//! ```yaml
//! url: https://gitlab.example.com
//! version: v4
//! token: glpat-xxxxxxxx
//! retry:
//!   max_retries: 5
//!   max_wait_seconds: 120
//! ```

use crate::error::Result;
use crate::http::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Default GitLab host
pub const DEFAULT_URL: &str = "https://gitlab.com";

/// Default API version segment
pub const DEFAULT_VERSION: &str = "v4";

/// Environment variable overriding the host URL
pub const ENV_URL: &str = "GITLAB_URL";

/// Environment variable holding a private token
pub const ENV_TOKEN: &str = "GITLAB_TOKEN";

/// Environment variable holding an OAuth token
pub const ENV_OAUTH_TOKEN: &str = "GITLAB_OAUTH_TOKEN";

/// Options recognized when building a client
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientOptions {
    /// Host URL, without the `/api/<version>` suffix
    #[serde(default = "default_url")]
    pub url: String,

    /// API version segment
    #[serde(default = "default_version")]
    pub version: String,

    /// Private token
    #[serde(default)]
    pub token: Option<String>,

    /// OAuth token (preferred when both are set)
    #[serde(default, alias = "oauthToken")]
    pub oauth_token: Option<String>,

    /// Convert response record keys to camelCase
    #[serde(default)]
    pub camelize: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Rate-limit retry policy
    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            url: default_url(),
            version: default_version(),
            token: None,
            oauth_token: None,
            camelize: false,
            timeout_seconds: default_timeout_seconds(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientOptions {
    /// Create options with defaults and no credentials
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host URL
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the API version
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set a private token
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set an OAuth token
    #[must_use]
    pub fn oauth_token(mut self, token: impl Into<String>) -> Self {
        self.oauth_token = Some(token.into());
        self
    }

    /// Enable camelCase conversion of response records
    #[must_use]
    pub fn camelize(mut self, camelize: bool) -> Self {
        self.camelize = camelize;
        self
    }

    /// Set the rate-limit retry policy
    #[must_use]
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Parse options from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load options from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Overlay `GITLAB_URL`, `GITLAB_TOKEN` and `GITLAB_OAUTH_TOKEN`
    #[must_use]
    pub fn with_env(self) -> Self {
        self.overlay(|key| std::env::var(key).ok())
    }

    /// Overlay values from a variable lookup; set, non-empty values win
    #[must_use]
    pub fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = get(ENV_URL) {
            self.url = url;
        }
        if let Some(token) = get(ENV_TOKEN) {
            self.token = Some(token);
        }
        if let Some(token) = get(ENV_OAUTH_TOKEN) {
            self.oauth_token = Some(token);
        }
        self
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |t: &Option<String>| t.as_ref().map(|_| "***");
        f.debug_struct("ClientOptions")
            .field("url", &self.url)
            .field("version", &self.version)
            .field("token", &redact(&self.token))
            .field("oauth_token", &redact(&self.oauth_token))
            .field("camelize", &self.camelize)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("retry", &self.retry)
            .finish()
    }
}
