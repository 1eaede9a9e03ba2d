//! Rate-limit backoff
//!
//! A 429 response carrying `retry-after` is retried after sleeping for the
//! requested number of seconds. The number of retries and the length of a
//! single wait are both bounded.

use super::executor::{HttpExecutor, HttpResponse};
use super::request::RequestDescriptor;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

/// Bounded sleep-and-retry policy for rate-limited requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of rate-limit retries per request
    pub max_retries: u32,
    /// Longest single wait, in seconds
    pub max_wait_seconds: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 10,
            max_wait_seconds: 300,
        }
    }
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(max_retries: u32, max_wait_seconds: u64) -> Self {
        Self {
            max_retries,
            max_wait_seconds,
        }
    }

    /// Policy that never retries
    pub fn disabled() -> Self {
        Self::new(0, 0)
    }

    /// How long to sleep for a server-requested wait
    ///
    /// `None` when the server asks for longer than `max_wait_seconds`; the
    /// request is then not reissued at all.
    pub fn wait_for(&self, retry_after_seconds: u64) -> Option<Duration> {
        (retry_after_seconds <= self.max_wait_seconds)
            .then(|| Duration::from_secs(retry_after_seconds))
    }

    /// Execute a request, sleeping and reissuing it while rate limited
    ///
    /// Every other outcome, success or error, is returned as-is.
    pub async fn execute(
        &self,
        executor: &dyn HttpExecutor,
        request: &RequestDescriptor,
    ) -> Result<HttpResponse> {
        let mut attempt = 0;

        loop {
            match executor.execute(request).await {
                Err(e) if attempt < self.max_retries => {
                    let Some(retry_after) = e.retry_after() else {
                        return Err(e);
                    };
                    let Some(wait) = self.wait_for(retry_after) else {
                        warn!(
                            "Rate limited (429), retry-after {}s exceeds max wait {}s, giving up on {}",
                            retry_after, self.max_wait_seconds, request.url
                        );
                        return Err(e);
                    };
                    warn!(
                        "Rate limited (429), attempt {}/{}, waiting {:?} before retrying {}",
                        attempt + 1,
                        self.max_retries + 1,
                        wait,
                        request.url
                    );
                    tokio::time::sleep(wait).await;
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }
}

/// Parse a `retry-after` header holding a number of seconds
///
/// HTTP-date values are not supported and yield `None`.
pub fn parse_retry_after(value: &str) -> Option<u64> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(secs);
    }
    // Some proxies send fractional seconds
    value
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s >= 0.0)
        .map(|s| s.ceil() as u64)
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;

    #[test]
    fn test_retry_policy_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 10);
        assert_eq!(policy.max_wait_seconds, 300);
    }

    #[test]
    fn test_wait_beyond_max_is_refused() {
        let policy = RetryPolicy::new(3, 5);
        assert_eq!(policy.wait_for(2), Some(Duration::from_secs(2)));
        assert_eq!(policy.wait_for(5), Some(Duration::from_secs(5)));
        assert_eq!(policy.wait_for(3600), None);
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("1"), Some(1));
        assert_eq!(parse_retry_after(" 30 "), Some(30));
        assert_eq!(parse_retry_after("1.2"), Some(2));
        assert_eq!(parse_retry_after("-1"), None);
        assert_eq!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT"), None);
        assert_eq!(parse_retry_after(""), None);
    }

    #[test]
    fn test_retry_policy_from_yaml() {
        let policy: RetryPolicy = serde_yaml::from_str("max_retries: 2").unwrap();
        assert_eq!(policy.max_retries, 2);
        assert_eq!(policy.max_wait_seconds, 300);
    }
}
