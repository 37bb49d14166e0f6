//! HTTP layer: the `Transport` seam and the reqwest-backed `MarketDataHttp`.

pub mod client;
pub mod retry;

pub use client::MarketDataHttp;
pub use retry::{RetryConfig, RetryPolicy};

use crate::error::HttpError;
use async_trait::async_trait;
use serde_json::Value;

/// Anything that can answer a GET with a JSON body.
///
/// `MarketDataHttp` is the production implementation; tests plug in scripted
/// transports to control when (and in which order) responses arrive.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, HttpError>;
}
