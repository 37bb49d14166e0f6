//! Low-level HTTP client: `MarketDataHttp`.
//!
//! Performs GETs and returns the JSON body untouched. Decoding into domain
//! types happens above this layer so malformed records can be tolerated
//! individually.

use crate::error::HttpError;
use crate::http::retry::{self, RetryPolicy};
use crate::http::Transport;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, RETRY_AFTER};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Low-level HTTP client for the market-data REST API.
#[derive(Clone)]
pub struct MarketDataHttp {
    client: Client,
    retry: RetryPolicy,
}

impl MarketDataHttp {
    /// Build a client. `timeout` is unset by default: a hung request simply
    /// stays pending until superseded.
    pub fn new(timeout: Option<Duration>, retry: RetryPolicy) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.pool_max_idle_per_host(10);
            if let Some(t) = timeout {
                builder = builder.timeout(t);
            }
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        Ok(Self {
            client: builder.build()?,
            retry,
        })
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn do_request(&self, url: &str) -> Result<Value, HttpError> {
        tracing::debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<Value>().await?);
        }

        let status_code = status.as_u16();
        let retry_after_ms = parse_retry_after(resp.headers());
        let body_text = resp.text().await.unwrap_or_default();

        Err(classify_status(status_code, body_text, retry_after_ms))
    }
}

/// `Retry-After` in milliseconds. Only the delta-seconds form is read; values
/// that overflow are ignored.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .and_then(|secs| secs.checked_mul(1000))
}

/// Map a non-success status to an `HttpError`.
pub(crate) fn classify_status(status: u16, body: String, retry_after_ms: Option<u64>) -> HttpError {
    match status {
        404 => HttpError::NotFound(body),
        429 => HttpError::RateLimited { retry_after_ms },
        400..=499 => HttpError::BadRequest(body),
        _ => HttpError::ServerError { status, body },
    }
}

#[async_trait]
impl Transport for MarketDataHttp {
    async fn get_json(&self, url: &str) -> Result<Value, HttpError> {
        retry::run(&self.retry, url, || self.do_request(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_status() {
        assert!(matches!(classify_status(404, "gone".into(), None), HttpError::NotFound(b) if b == "gone"));
        assert!(matches!(
            classify_status(429, String::new(), Some(60_000)),
            HttpError::RateLimited { retry_after_ms: Some(60_000) }
        ));
        assert!(matches!(classify_status(401, String::new(), None), HttpError::BadRequest(_)));
        assert!(matches!(
            classify_status(500, "oops".into(), None),
            HttpError::ServerError { status: 500, .. }
        ));
        assert!(matches!(
            classify_status(302, String::new(), None),
            HttpError::ServerError { status: 302, .. }
        ));
    }

    fn retry_after(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after(&retry_after("60")), Some(60_000));
        assert_eq!(parse_retry_after(&retry_after(" 2 ")), Some(2_000));
        assert_eq!(parse_retry_after(&HeaderMap::new()), None);
        assert_eq!(
            parse_retry_after(&retry_after("Wed, 21 Oct 2015 07:28:00 GMT")),
            None
        );
    }

    #[test]
    fn test_parse_retry_after_overflow_is_ignored() {
        assert_eq!(parse_retry_after(&retry_after("99999999999999999")), None);
        assert_eq!(parse_retry_after(&retry_after(&u64::MAX.to_string())), None);
    }

    #[test]
    fn test_new_defaults_to_no_retry() {
        let http = MarketDataHttp::new(None, RetryPolicy::default()).unwrap();
        assert!(matches!(http.retry_policy(), RetryPolicy::None));
    }
}
