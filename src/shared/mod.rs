//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the market-data API sends, so they can be used directly in wire
//! types without conversion overhead.

pub mod fmt;
pub mod serde_util;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// Newtype for asset identifiers (e.g. `"bitcoin"`, `"wrapped-steth"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for AssetId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AssetId(s.to_string()))
    }
}

impl Serialize for AssetId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(AssetId(s))
    }
}

// ─── Metric ──────────────────────────────────────────────────────────────────

/// A figure that the source payload may omit.
///
/// `Unavailable` is never the same thing as zero: a missing circulating supply
/// stays `Unavailable` and renders as `"N/A"`. Serializes as the value or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric<T> {
    Known(T),
    Unavailable,
}

impl<T> Metric<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Metric::Known(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Metric::Unavailable)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Metric::Known(v) => Some(v),
            Metric::Unavailable => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Metric::Known(v) => Some(v),
            Metric::Unavailable => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Metric<U> {
        match self {
            Metric::Known(v) => Metric::Known(f(v)),
            Metric::Unavailable => Metric::Unavailable,
        }
    }

    /// Render with `f`, or `"N/A"` when unavailable.
    pub fn render(&self, f: impl FnOnce(&T) -> String) -> String {
        match self {
            Metric::Known(v) => f(v),
            Metric::Unavailable => UNAVAILABLE_LABEL.to_string(),
        }
    }
}

impl<T> Default for Metric<T> {
    fn default() -> Self {
        Metric::Unavailable
    }
}

impl<T> From<Option<T>> for Metric<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Metric::Known(v),
            None => Metric::Unavailable,
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Metric<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Metric::Known(v) => write!(f, "{}", v),
            Metric::Unavailable => write!(f, "{}", UNAVAILABLE_LABEL),
        }
    }
}

/// Label rendered for an unavailable figure.
pub const UNAVAILABLE_LABEL: &str = "N/A";

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_asset_id_serde() {
        let id = AssetId::from("bitcoin");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bitcoin\"");
        let back: AssetId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_metric_unavailable_is_not_zero() {
        let missing: Metric<Decimal> = None.into();
        let zero: Metric<Decimal> = Some(Decimal::ZERO).into();
        assert_ne!(missing, zero);
        assert!(missing.is_unavailable());
        assert_eq!(missing.to_string(), "N/A");
        assert_eq!(zero.to_string(), "0");
    }

    #[test]
    fn test_metric_serializes_as_value_or_null() {
        let known = Metric::Known(21_000_000u64);
        assert_eq!(serde_json::to_string(&known).unwrap(), "21000000");
        let missing: Metric<u64> = Metric::Unavailable;
        assert_eq!(serde_json::to_string(&missing).unwrap(), "null");
    }

    #[test]
    fn test_metric_render() {
        let known = Metric::Known(3u32);
        assert_eq!(known.render(|v| format!("#{v}")), "#3");
        assert_eq!(Metric::<u32>::Unavailable.render(|v| format!("#{v}")), "N/A");
    }
}
