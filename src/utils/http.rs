use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{trace, warn};

use crate::config::HttpConfig;
use crate::error::FetchError;

pub fn create_client(http: &HttpConfig) -> Result<Client, FetchError> {
    let client = ClientBuilder::new()
        .user_agent(http.user_agent.as_str())
        .timeout(Duration::from_secs(http.timeout_seconds))
        .cookie_store(true)
        .pool_max_idle_per_host(2)
        .build()?;

    Ok(client)
}

/// How often and how patiently a URL is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(http: &HttpConfig) -> Self {
        Self {
            max_retries: http.max_retries.max(1),
            backoff: Duration::from_millis(http.retry_backoff_ms),
            max_backoff: Duration::from_millis(http.max_backoff_ms),
        }
    }

    /// Delay before retry number `attempt` (1-based), doubling up to `max_backoff`
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.backoff.saturating_mul(factor).min(self.max_backoff)
    }
}

/// Fetch a page body.
///
/// 429 and unexpected statuses are retried with back-off, transport errors
/// too. 400 fails straight away since repeating the request cannot help.
pub async fn fetch_html(client: &Client, url: &str, policy: &RetryPolicy) -> Result<String, FetchError> {
    trace!("Fetching HTML content from url: {}", url);

    let max_retries = policy.max_retries.max(1);
    let mut last_error = None;

    for attempt in 1..=max_retries {
        trace!("Tries remaining: {}", max_retries - attempt + 1);

        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    trace!("Received valid response from url: {}", url);
                    return Ok(response.text().await?);
                }
                match status {
                    StatusCode::BAD_REQUEST => {
                        warn!("Bad request (status code 400): {}", url);
                        return Err(FetchError::BadRequest(url.to_string()));
                    }
                    StatusCode::TOO_MANY_REQUESTS => {
                        trace!("Too many requests (status code 429): {}", url);
                        last_error = Some(FetchError::TooManyRequests(url.to_string()));
                    }
                    _ => {
                        warn!("HTTP error {}: {}", status, url);
                        last_error = Some(FetchError::BadStatus {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }
                }
            }
            Err(e) => {
                trace!("Request error for {}: {}. Will try again.", url, e);
                last_error = Some(FetchError::Request(e));
            }
        }

        if attempt < max_retries {
            let delay = policy.delay(attempt);
            trace!("Retrying in {:?}... (attempt {}/{})", delay, attempt + 1, max_retries);
            sleep(delay).await;
        }
    }

    let last = last_error.unwrap_or_else(|| FetchError::InvalidUrl(url.to_string()));
    warn!("Giving up on {} after {} attempts: {}", url, max_retries, last);
    Err(FetchError::RetriesExhausted {
        url: url.to_string(),
        attempts: max_retries,
        last: Box::new(last),
    })
}
