//! HTTP module
//!
//! Request descriptors, the executor seam, and rate-limit backoff.
//!
//! # Features
//!
//! - **Request Descriptors**: plain data describing one call (method, URL,
//!   headers, query or body), built fresh per call
//! - **Executors**: the `HttpExecutor` trait with a `reqwest` implementation
//! - **Rate-Limit Backoff**: bounded sleep-and-retry on 429 + `retry-after`

mod executor;
mod rate_limit;
mod request;

pub use executor::{ExecutorConfig, HttpExecutor, HttpResponse, ReqwestExecutor};
pub use rate_limit::{parse_retry_after, RetryPolicy};
pub use request::{join_url, query_pairs, RequestBody, RequestDescriptor};

#[cfg(test)]
pub(crate) mod mock;
