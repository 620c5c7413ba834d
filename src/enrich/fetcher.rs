//! HTTP client construction and the retry executor
//!
//! Every page retrieval goes through [`fetch_with_retry`], which paces
//! requests through the shared [`RateLimiter`], honors server-supplied
//! `Retry-After` hints on 429s without consuming an attempt, and backs off
//! exponentially on transient failures.

use crate::config::HttpConfig;
use crate::enrich::limiter::RateLimiter;
use crate::FetchError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Default wait when a 429 response carries no Retry-After header
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(30);

/// Retry behavior for one fetch call
///
/// The attempt counter is owned by each [`fetch_with_retry`] invocation;
/// the policy only carries the shared constants.
#[derive(Debug, Clone)]
pub struct FetchPolicy {
    /// Maximum attempts before giving up on transient failures
    pub max_attempts: u32,

    /// Base unit for the `2^attempt` exponential backoff
    pub backoff_unit: Duration,

    /// Wait applied to a 429 response without a Retry-After header
    pub retry_after_default: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_unit: Duration::from_secs(1),
            retry_after_default: DEFAULT_RETRY_AFTER,
        }
    }
}

impl FetchPolicy {
    /// Backoff before retrying after the given 0-indexed failed attempt
    fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_unit * 2u32.saturating_pow(attempt)
    }
}

/// Builds the shared HTTP client used for all page and API requests
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL, retrying transient failures with exponential backoff
///
/// # Algorithm
///
/// 1. Wait on the rate limiter before every attempt, retries included.
/// 2. 2xx: return the body immediately.
/// 3. 429: sleep for the server's Retry-After (default 30s) and retry
///    without consuming an attempt.
/// 4. Other 4xx: terminal, fail with [`FetchError::Status`].
/// 5. Timeout / connect error / 5xx: sleep `2^attempt` backoff units and
///    retry; once `max_attempts` such failures accumulate, fail with
///    [`FetchError::Exhausted`].
pub async fn fetch_with_retry(
    client: &Client,
    limiter: &RateLimiter,
    url: &str,
    policy: &FetchPolicy,
) -> Result<String, FetchError> {
    let mut attempt: u32 = 0;

    loop {
        limiter.acquire().await;

        let failure: String = match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = parse_retry_after(&response)
                        .unwrap_or(policy.retry_after_default);
                    tracing::warn!(
                        "Rate limited on {}, waiting {:?} before retrying",
                        url,
                        retry_after
                    );
                    tokio::time::sleep(retry_after).await;
                    // 429 does not consume an attempt
                    continue;
                }

                if status.is_client_error() {
                    return Err(FetchError::Status {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }

                if status.is_success() {
                    match response.text().await {
                        Ok(body) => return Ok(body),
                        Err(e) => format!("failed to read body: {}", e),
                    }
                } else {
                    format!("HTTP {}", status.as_u16())
                }
            }
            Err(e) => {
                if e.is_timeout() {
                    "request timeout".to_string()
                } else if e.is_connect() {
                    "connection error".to_string()
                } else {
                    e.to_string()
                }
            }
        };

        if attempt + 1 >= policy.max_attempts {
            return Err(FetchError::Exhausted {
                url: url.to_string(),
                attempts: policy.max_attempts,
                reason: failure,
            });
        }

        let backoff = policy.backoff(attempt);
        tracing::debug!(
            "Attempt {} for {} failed ({}), retrying in {:?}",
            attempt + 1,
            url,
            failure,
            backoff
        );
        tokio::time::sleep(backoff).await;
        attempt += 1;
    }
}

/// Reads the Retry-After header as whole seconds, if present and parseable
fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
