//! # gitlab-requester
//!
//! A small helper for talking to GitLab-style REST APIs.
//!
//! ## Features
//!
//! - **Request descriptors**: method, URL, headers, query and body built in one place
//! - **Auth headers**: `Authorization: Bearer` for OAuth, `private-token` otherwise
//! - **Link-header pagination**: follows `rel="next"` until exhausted or a page limit
//! - **Rate-limit backoff**: GET pages honour `429` + `retry-after`; mutations never retry
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gitlab_requester::{ClientContext, ClientOptions, PaginationOptions, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = ClientContext::new(ClientOptions::new().token("glpat-..."))?;
//!
//!     let projects = ctx
//!         .get::<serde_json::Value>("projects", &PaginationOptions::new().per_page(100))
//!         .await?;
//!
//!     ctx.post("projects/1/issues", serde_json::json!({"title": "Bug"})).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     ClientContext                        │
//! │  get() / pages()           post() put() delete()         │
//! └──────────────────────────────────────────────────────────┘
//!               │                         │
//! ┌─────────────┴──────────┬──────────────┴─────┬───────────┐
//! │      Pagination        │        HTTP        │   Auth    │
//! ├────────────────────────┼────────────────────┼───────────┤
//! │ Link header parsing    │ RequestDescriptor  │ OAuth     │
//! │ x-* metadata           │ HttpExecutor       │ Private   │
//! │ Page stream            │ RetryPolicy (429)  │ token     │
//! └────────────────────────┴────────────────────┴───────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::return_self_not_must_use)]

/// Authentication headers
pub mod auth;
/// Key casing conversion
pub mod casing;
/// Command-line interface
pub mod cli;
/// Client context and request operations
pub mod client;
/// Client options
pub mod config;
/// Error types
pub mod error;
/// HTTP requests, executors and rate-limit retry
pub mod http;
/// Link-header pagination
pub mod pagination;
/// Shared types
pub mod types;

pub use auth::{AuthConfig, Authenticator};
pub use client::ClientContext;
pub use config::ClientOptions;
pub use error::{Error, Result};
pub use http::{HttpExecutor, HttpResponse, RequestDescriptor, ReqwestExecutor, RetryPolicy};
pub use pagination::{Page, PageResult, PaginationInfo, PaginationOptions};
pub use types::{JsonObject, JsonValue, Method, ResponseType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
