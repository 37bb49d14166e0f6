//! Wire types for `GET {base}/{id}/market_chart`.

use serde::Deserialize;
use serde_json::Value;

/// The chart body. `prices` holds `[timestamp_ms, price]` pairs; the other
/// series in the body are not read.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<Value>,
}
