//! Wire types for the asset detail endpoint (`GET {base}/{id}`).
//!
//! Every field is optional and lenient: the detail payload is large, loosely
//! typed, and varies per asset. Validation happens in `convert.rs`.

use crate::shared::serde_util::{decimal_from_value, lenient, lenient_decimal, lenient_timestamp};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Per-currency values, e.g. `{"usd": 50000, "eur": 46000}`.
pub type CurrencyMap = HashMap<String, Value>;

/// Quote currency read out of every [`CurrencyMap`].
pub const QUOTE_CURRENCY: &str = "usd";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub market_cap_rank: Option<u32>,
    /// Localized long-form text keyed by language code.
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<HashMap<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<ImageSet>,
    #[serde(default, deserialize_with = "lenient")]
    pub links: Option<LinkSet>,
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub market_data: Option<MarketDataRecord>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageSet {
    #[serde(default, deserialize_with = "lenient")]
    pub thumb: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub small: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub large: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkSet {
    #[serde(default, deserialize_with = "lenient")]
    pub homepage: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "lenient")]
    pub blockchain_site: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketDataRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub current_price: Option<CurrencyMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub market_cap: Option<CurrencyMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub high_24h: Option<CurrencyMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub low_24h: Option<CurrencyMap>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price_change_24h: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price_change_percentage_24h: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub circulating_supply: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_supply: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    pub ath: Option<CurrencyMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub ath_date: Option<CurrencyMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub atl: Option<CurrencyMap>,
    #[serde(default, deserialize_with = "lenient")]
    pub atl_date: Option<CurrencyMap>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// The quote-currency entry of a map, as a decimal.
pub fn quote(map: &Option<CurrencyMap>) -> Option<Decimal> {
    map.as_ref()
        .and_then(|m| m.get(QUOTE_CURRENCY))
        .and_then(decimal_from_value)
}

/// The quote-currency entry of a map, as a string.
pub fn quote_str(map: &Option<CurrencyMap>) -> Option<&str> {
    map.as_ref()
        .and_then(|m| m.get(QUOTE_CURRENCY))
        .and_then(Value::as_str)
}
