//! Opt-in retry policies for raw HTTP requests.
//!
//! The dashboard session never retries on its own: a failed fetch stays failed
//! until the user changes an option. Retries exist only for callers that use
//! `MarketDataHttp` directly and ask for them.

use crate::error::HttpError;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt.
    #[default]
    None,
    /// Retry transport failures, 429 and 502/503/504 with exponential backoff.
    Idempotent,
    /// Caller-provided settings.
    Custom(RetryConfig),
}

impl RetryPolicy {
    fn config(&self) -> Option<RetryConfig> {
        match self {
            RetryPolicy::None => None,
            RetryPolicy::Idempotent => Some(RetryConfig::idempotent()),
            RetryPolicy::Custom(c) => Some(c.clone()),
        }
    }
}

/// Backoff settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Attempts after the first one.
    pub max_retries: u32,
    pub initial_delay: Duration,
    /// Upper bound on any single wait, including a server's `Retry-After`.
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Spread each delay by up to ±25%.
    pub jitter: bool,
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    /// CoinGecko's public tier rate-limits aggressively, so 429 is retryable
    /// and the first backoff is a full second.
    pub fn idempotent() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Delay before retry number `attempt` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp = self.backoff_factor.powi(attempt as i32);
        let capped = self.initial_delay.mul_f64(exp).min(self.max_delay);
        if !self.jitter {
            return capped;
        }
        let spread = (rand::random::<f64>() - 0.5) * 0.5;
        capped.mul_f64((1.0 + spread).max(0.0))
    }

    /// Whether `err` is worth another attempt under this config.
    pub fn is_retryable(&self, err: &HttpError) -> bool {
        match err {
            HttpError::ServerError { status, .. } => self.retryable_statuses.contains(status),
            HttpError::RateLimited { .. } => self.retryable_statuses.contains(&429),
            HttpError::Transport(_) | HttpError::Timeout => true,
            #[cfg(not(target_arch = "wasm32"))]
            HttpError::Reqwest(e) => e.is_connect() || e.is_timeout(),
            #[cfg(target_arch = "wasm32")]
            HttpError::Reqwest(e) => e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    /// Wait before retry number `attempt` after `err`. A server-provided
    /// `Retry-After` wins over the backoff curve; both are capped at
    /// `max_delay`.
    pub fn wait_after(&self, err: &HttpError, attempt: u32) -> Duration {
        match err {
            HttpError::RateLimited {
                retry_after_ms: Some(ms),
            } => Duration::from_millis(*ms).min(self.max_delay),
            _ => self.delay_for_attempt(attempt),
        }
    }
}

/// Run `attempt` under `policy`.
///
/// Non-retryable errors are returned as they are. When every allowed attempt
/// fails with a retryable error the result is
/// [`HttpError::MaxRetriesExceeded`] wrapping the last one.
pub async fn run<F, Fut>(policy: &RetryPolicy, url: &str, mut attempt: F) -> Result<Value, HttpError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Value, HttpError>>,
{
    let Some(config) = policy.config() else {
        return attempt().await;
    };

    let mut attempts = 0u32;
    loop {
        let err = match attempt().await {
            Ok(body) => return Ok(body),
            Err(e) => e,
        };
        attempts += 1;

        if !config.is_retryable(&err) {
            return Err(err);
        }
        if attempts > config.max_retries {
            return Err(HttpError::MaxRetriesExceeded {
                attempts,
                last_error: Box::new(err),
            });
        }

        let delay = config.wait_after(&err, attempts - 1);
        tracing::debug!(
            attempt = attempts,
            max = config.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %err,
            "Retrying request to {}",
            url
        );
        futures_timer::Delay::new(delay).await;
    }
}
