//! Price history domain: the 7-day price series behind the detail chart.

#[cfg(feature = "http")]
pub mod client;
pub mod wire;

use crate::error::SdkError;
use crate::shared::fmt;
use crate::shared::serde_util::decimal_from_value;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single point on the price chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp in milliseconds.
    pub timestamp_ms: i64,
    pub price: Decimal,
}

impl PricePoint {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp_ms)
    }

    /// X-axis label, `YYYY-MM-DD`.
    pub fn label(&self) -> String {
        self.time().map(|t| fmt::date(&t)).unwrap_or_default()
    }
}

/// Millisecond timestamp from a JSON number. Floats are accepted only when
/// they are whole and fit in `i64`.
fn timestamp_from_value(v: &Value) -> Option<i64> {
    if let Some(ms) = v.as_i64() {
        return Some(ms);
    }
    let f = v.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn point_from_pair(pair: &Value) -> Option<PricePoint> {
    let pair = pair.as_array()?;
    if pair.len() < 2 {
        return None;
    }
    let timestamp_ms = timestamp_from_value(&pair[0])?;
    let price = decimal_from_value(&pair[1])?;
    Some(PricePoint {
        timestamp_ms,
        price,
    })
}

/// Turn a market-chart body into its price series.
///
/// Pairs keep their source order and are not re-sorted. An empty `prices`
/// list is an empty series. A body without `prices` is a malformed payload;
/// individual pairs that are not `[number, number]` are skipped.
pub fn build(payload: &Value) -> Result<Vec<PricePoint>, SdkError> {
    let raw: wire::MarketChartResponse = serde_json::from_value(payload.clone())
        .map_err(|e| SdkError::MalformedPayload(format!("market chart: {}", e)))?;

    let points: Vec<PricePoint> = raw.prices.iter().filter_map(point_from_pair).collect();
    let skipped = raw.prices.len() - points.len();
    if skipped > 0 {
        tracing::warn!(skipped, kept = points.len(), "Skipped malformed price points");
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_build_preserves_order() {
        let series = build(&json!({
            "prices": [
                [1709251200000i64, 61234.5],
                [1709254800000i64, 61400],
                [1709258400000i64, "61388.25"]
            ],
            "market_caps": [],
            "total_volumes": []
        }))
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].timestamp_ms, 1709251200000);
        assert_eq!(series[0].price, Decimal::from_str("61234.5").unwrap());
        assert_eq!(series[2].price, Decimal::from_str("61388.25").unwrap());
        assert_eq!(series[0].label(), "2024-03-01");
    }

    #[test]
    fn test_out_of_order_input_is_not_resorted() {
        let series = build(&json!({"prices": [[3, 1], [1, 2], [2, 3]]})).unwrap();
        let ts: Vec<i64> = series.iter().map(|p| p.timestamp_ms).collect();
        assert_eq!(ts, [3, 1, 2]);
    }

    #[test]
    fn test_empty_prices_is_empty_series() {
        assert!(build(&json!({"prices": []})).unwrap().is_empty());
    }

    #[test]
    fn test_missing_prices_is_malformed() {
        assert!(matches!(
            build(&json!({"error": "coin not found"})),
            Err(SdkError::MalformedPayload(_))
        ));
        assert!(matches!(build(&json!([])), Err(SdkError::MalformedPayload(_))));
    }

    #[test]
    fn test_bad_pairs_are_skipped() {
        let series = build(&json!({
            "prices": [[1, 10], [2], "x", [3, null], [4, 40]]
        }))
        .unwrap();
        let ts: Vec<i64> = series.iter().map(|p| p.timestamp_ms).collect();
        assert_eq!(ts, [1, 4]);
    }

    #[test]
    fn test_fractional_or_out_of_range_timestamps_are_skipped() {
        let series = build(&json!({
            "prices": [[1.5, 10], [1e30, 10], [-1e30, 10], [2.0, 20], [3, 30]]
        }))
        .unwrap();
        let ts: Vec<i64> = series.iter().map(|p| p.timestamp_ms).collect();
        assert_eq!(ts, [2, 3]);
        assert_eq!(series[0].price, Decimal::from(20));
    }
}
