//! Market domain: the listed asset summaries, their decoding, the store that
//! holds the latest page, and the filter/sort projection over it.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod view;
pub mod wire;

use crate::shared::fmt::decimal;
use crate::shared::AssetId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use convert::{decode_markets, DecodedMarkets};
pub use state::MarketDataStore;
pub use view::{apply, MarketView};

// ─── AssetSummary ────────────────────────────────────────────────────────────

/// One listed asset, as shown on the home grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub id: AssetId,
    pub symbol: String,
    pub name: String,
    pub image_url: Option<String>,
    pub current_price: Decimal,
    pub market_cap: Decimal,
    /// Signed percent; `None` when the API reports no 24h change.
    pub price_change_pct_24h: Option<Decimal>,
}

impl AssetSummary {
    /// Display strings for a grid card.
    pub fn card(&self) -> AssetCard {
        AssetCard {
            id: self.id.clone(),
            name: self.name.clone(),
            symbol: self.symbol.to_uppercase(),
            image_url: self.image_url.clone(),
            price: decimal::usd(&self.current_price),
            market_cap: decimal::display(&self.market_cap.round()),
            market_cap_short: decimal::abbr(&self.market_cap, 2),
            change_24h: self
                .price_change_pct_24h
                .as_ref()
                .map(decimal::percent)
                .unwrap_or_else(|| crate::shared::UNAVAILABLE_LABEL.to_string()),
            trend: Trend::of(self.price_change_pct_24h),
        }
    }
}

/// Direction of the 24h change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Unknown,
}

impl Trend {
    pub fn of(change: Option<Decimal>) -> Self {
        match change {
            Some(c) if c.is_sign_negative() && !c.is_zero() => Trend::Down,
            Some(_) => Trend::Up,
            None => Trend::Unknown,
        }
    }
}

/// Pre-formatted card fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCard {
    pub id: AssetId,
    pub name: String,
    pub symbol: String,
    pub image_url: Option<String>,
    pub price: String,
    pub market_cap: String,
    /// `"900.00B"`
    pub market_cap_short: String,
    pub change_24h: String,
    pub trend: Trend,
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Why a raw list record was dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NotAnObject,
    MissingField(&'static str),
    DuplicateId(AssetId),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NotAnObject => write!(f, "Record is not an object"),
            ValidationError::MissingField(field) => write!(f, "Missing {}", field),
            ValidationError::DuplicateId(id) => write!(f, "Duplicate id {}", id),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn bitcoin() -> AssetSummary {
        AssetSummary {
            id: AssetId::from("bitcoin"),
            symbol: "btc".to_string(),
            name: "Bitcoin".to_string(),
            image_url: Some("https://example.test/btc.png".to_string()),
            current_price: Decimal::from(50000),
            market_cap: Decimal::from(900_000_000_000u64),
            price_change_pct_24h: Some(Decimal::from_str("2.5").unwrap()),
        }
    }

    #[test]
    fn test_card_formats_fields() {
        let card = bitcoin().card();
        assert_eq!(card.symbol, "BTC");
        assert_eq!(card.price, "$50,000");
        assert_eq!(card.market_cap, "900,000,000,000");
        assert_eq!(card.market_cap_short, "900.00B");
        assert_eq!(card.change_24h, "2.50%");
        assert_eq!(card.trend, Trend::Up);
    }

    #[test]
    fn test_card_negative_and_missing_change() {
        let mut asset = bitcoin();
        asset.price_change_pct_24h = Some(Decimal::from_str("-1.2").unwrap());
        assert_eq!(asset.card().trend, Trend::Down);
        assert_eq!(asset.card().change_24h, "-1.20%");

        asset.price_change_pct_24h = None;
        assert_eq!(asset.card().trend, Trend::Unknown);
        assert_eq!(asset.card().change_24h, "N/A");
    }

    #[test]
    fn test_zero_change_is_up() {
        assert_eq!(Trend::of(Some(Decimal::ZERO)), Trend::Up);
    }
}
