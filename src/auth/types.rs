//! Auth configuration types

use crate::error::{Error, Result};
use std::fmt;

/// The single credential a client authenticates with
#[derive(Clone, PartialEq, Eq)]
pub enum AuthConfig {
    /// Personal/project access token sent as `private-token`
    PrivateToken {
        /// The token value
        token: String,
    },

    /// OAuth2 access token sent as `authorization: Bearer ...`
    OAuth {
        /// The bearer token
        token: String,
    },
}

impl AuthConfig {
    /// Pick the credential from the optional token pair
    ///
    /// An OAuth token takes precedence over a private token. Empty strings
    /// count as absent. Fails when neither is usable.
    pub fn from_tokens(token: Option<&str>, oauth_token: Option<&str>) -> Result<Self> {
        fn present(t: Option<&str>) -> Option<&str> {
            t.map(str::trim).filter(|t| !t.is_empty())
        }

        if let Some(oauth) = present(oauth_token) {
            return Ok(Self::OAuth {
                token: oauth.to_string(),
            });
        }
        if let Some(token) = present(token) {
            return Ok(Self::PrivateToken {
                token: token.to_string(),
            });
        }

        Err(Error::config(
            "`token` (private-token) or `oauth_token` is mandatory",
        ))
    }

    /// Create private token auth
    pub fn private_token(token: impl Into<String>) -> Self {
        Self::PrivateToken {
            token: token.into(),
        }
    }

    /// Create OAuth bearer auth
    pub fn oauth(token: impl Into<String>) -> Self {
        Self::OAuth {
            token: token.into(),
        }
    }

    /// Short name of the credential kind, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PrivateToken { .. } => "private-token",
            Self::OAuth { .. } => "oauth",
        }
    }
}

// Tokens never reach logs through Debug
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("kind", &self.kind())
            .field("token", &"***")
            .finish()
    }
}
