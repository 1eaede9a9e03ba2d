//! Authenticator implementation
//!
//! Builds the static auth header map a client attaches to each request.

use super::types::AuthConfig;
use crate::http::RequestDescriptor;
use crate::types::HeaderPairs;

/// Header carrying an OAuth bearer token
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Header carrying a GitLab private token
pub const PRIVATE_TOKEN_HEADER: &str = "private-token";

/// Authenticator handles applying authentication to request descriptors
#[derive(Debug, Clone)]
pub struct Authenticator {
    config: AuthConfig,
    headers: HeaderPairs,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        let mut headers = HeaderPairs::new();
        match &config {
            AuthConfig::OAuth { token } => {
                headers.insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {token}"));
            }
            AuthConfig::PrivateToken { token } => {
                headers.insert(PRIVATE_TOKEN_HEADER.to_string(), token.clone());
            }
        }
        Self { config, headers }
    }

    /// The auth config in use
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Auth headers, exactly one entry
    pub fn headers(&self) -> &HeaderPairs {
        &self.headers
    }

    /// Apply authentication to a request descriptor
    pub fn apply(&self, request: &mut RequestDescriptor) {
        for (key, value) in &self.headers {
            request.headers.insert(key.clone(), value.clone());
        }
    }
}
