//! Stateless client: `DashClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`. This module
//! keeps the builder, the endpoint configuration and the raw `fetch` used by
//! both the sub-clients and the dashboard session.

use crate::domain::asset::client::Assets;
use crate::domain::market::client::Markets;
use crate::domain::price_history::client::PriceHistoryClient;
use crate::error::{HttpError, SdkError};
use crate::http::{MarketDataHttp, RetryPolicy, Transport};
use crate::network::{COIN_API_URL_ENV, DEFAULT_COIN_API_URL, DEFAULT_MARKETS_URL, MARKETS_URL_ENV};
use crate::query::{Endpoints, RequestDescriptor};

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::asset::client::Assets as AssetsClient;
pub use crate::domain::market::client::Markets as MarketsClient;
pub use crate::domain::price_history::client::PriceHistoryClient as PriceHistorySubClient;

/// Entry point for direct, stateless API access.
#[derive(Clone)]
pub struct DashClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) endpoints: Endpoints,
}

impl DashClient {
    pub fn builder() -> DashClientBuilder {
        DashClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn markets(&self) -> Markets<'_> {
        Markets { client: self }
    }

    pub fn assets(&self) -> Assets<'_> {
        Assets { client: self }
    }

    pub fn price_history(&self) -> PriceHistoryClient<'_> {
        PriceHistoryClient { client: self }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Issue exactly one GET for `descriptor` and return the raw JSON body.
    pub async fn fetch(&self, descriptor: &RequestDescriptor) -> Result<Value, HttpError> {
        let url = descriptor.url(&self.endpoints);
        self.transport.get_json(&url).await
    }
}

impl std::fmt::Debug for DashClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashClient")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct DashClientBuilder {
    markets_url: String,
    coin_api_url: String,
    request_timeout: Option<Duration>,
    retry_policy: RetryPolicy,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for DashClientBuilder {
    fn default() -> Self {
        Self {
            markets_url: DEFAULT_MARKETS_URL.to_string(),
            coin_api_url: DEFAULT_COIN_API_URL.to_string(),
            request_timeout: None,
            retry_policy: RetryPolicy::None,
            transport: None,
        }
    }
}

impl DashClientBuilder {
    /// Defaults overridden by `CRYPTO_DASH_MARKETS_URL` / `CRYPTO_DASH_COIN_API_URL`.
    pub fn from_env() -> Self {
        let mut builder = Self::default();
        if let Some(url) = env_url(MARKETS_URL_ENV) {
            builder.markets_url = url;
        }
        if let Some(url) = env_url(COIN_API_URL_ENV) {
            builder.coin_api_url = url;
        }
        builder
    }

    pub fn markets_url(mut self, url: &str) -> Self {
        self.markets_url = url.to_string();
        self
    }

    pub fn coin_api_url(mut self, url: &str) -> Self {
        self.coin_api_url = url.to_string();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Use a custom transport instead of `MarketDataHttp`.
    ///
    /// `request_timeout` and `retry_policy` only configure the built-in
    /// transport and are ignored when one is supplied here.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<DashClient, SdkError> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(t) => t,
            None => Arc::new(MarketDataHttp::new(self.request_timeout, self.retry_policy)?),
        };
        Ok(DashClient {
            transport,
            endpoints: Endpoints::new(&self.markets_url, &self.coin_api_url),
        })
    }
}

fn env_url(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
