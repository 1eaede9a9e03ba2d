//! Authentication module
//!
//! Supports: GitLab private tokens and OAuth bearer tokens
//!
//! Exactly one credential is active per client. The `Authenticator` turns
//! it into the header map attached to every request.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, AUTHORIZATION_HEADER, PRIVATE_TOKEN_HEADER};
pub use types::AuthConfig;
