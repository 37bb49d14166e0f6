//! Asset detail domain: one asset's full profile, normalized for display.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::fmt::{self, decimal};
use crate::shared::{AssetId, Metric};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub use convert::adapt;

// ─── AssetDetail ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDetail {
    pub id: AssetId,
    pub name: String,
    pub symbol: String,
    pub market_cap_rank: Metric<u32>,
    /// First sentence of the English description; empty when there is none.
    pub description_summary: String,
    pub image_url_large: Option<String>,
    pub images: AssetImages,
    pub market_data: MarketSnapshot,
    pub links: AssetLinks,
    pub categories: Vec<String>,
}

impl AssetDetail {
    /// `"Bitcoin (BTC)"`.
    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.symbol.to_uppercase())
    }

    pub fn rank_label(&self) -> String {
        self.market_cap_rank.render(|r| format!("#{}", r))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetImages {
    pub thumb: Option<String>,
    pub small: Option<String>,
    pub large: Option<String>,
}

/// Quote-currency market figures. Each one may be unavailable independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub current_price: Metric<Decimal>,
    pub market_cap: Metric<Decimal>,
    pub high_24h: Metric<Decimal>,
    pub low_24h: Metric<Decimal>,
    pub price_change_24h: Metric<Decimal>,
    pub price_change_pct_24h: Metric<Decimal>,
    pub circulating_supply: Metric<Decimal>,
    pub total_supply: Metric<Decimal>,
    pub all_time_high: PriceExtreme,
    pub all_time_low: PriceExtreme,
    pub last_updated: Metric<DateTime<Utc>>,
}

impl MarketSnapshot {
    pub fn price_label(&self) -> String {
        self.current_price.render(decimal::usd)
    }

    pub fn market_cap_label(&self) -> String {
        self.market_cap.render(decimal::usd)
    }

    pub fn change_label(&self) -> String {
        self.price_change_pct_24h.render(decimal::percent)
    }

    pub fn circulating_supply_label(&self) -> String {
        self.circulating_supply.render(|v| decimal::display(&v.round()))
    }

    pub fn total_supply_label(&self) -> String {
        self.total_supply.render(|v| decimal::display(&v.round()))
    }

    pub fn last_updated_label(&self) -> String {
        self.last_updated.render(fmt::date)
    }
}

/// An all-time high or low and when it happened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceExtreme {
    pub value: Metric<Decimal>,
    pub date: Metric<DateTime<Utc>>,
}

impl PriceExtreme {
    /// `"$69,045 on 2021-11-10"`, or `"N/A"` without a value.
    pub fn label(&self) -> String {
        match (&self.value, &self.date) {
            (Metric::Known(v), Metric::Known(d)) => {
                format!("{} on {}", decimal::usd(v), fmt::date(d))
            }
            (Metric::Known(v), Metric::Unavailable) => decimal::usd(v),
            (Metric::Unavailable, _) => crate::shared::UNAVAILABLE_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetLinks {
    /// Non-empty entries only, source order.
    pub homepage_urls: Vec<String>,
    /// Non-empty entries only, source order.
    pub blockchain_explorer_urls: Vec<String>,
}

impl AssetLinks {
    pub fn is_empty(&self) -> bool {
        self.homepage_urls.is_empty() && self.blockchain_explorer_urls.is_empty()
    }
}

// ─── Text helpers ────────────────────────────────────────────────────────────

/// Text up to and including the first `.`, `!` or `?` that ends a sentence.
///
/// A terminator ends a sentence when followed by whitespace or the end of the
/// text, so `"v1.5"` is not split. Without one, the whole trimmed text is
/// returned.
pub fn first_sentence(text: &str) -> &str {
    let text = text.trim();
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        match chars.peek() {
            None => return text,
            Some((_, next)) if next.is_whitespace() => return &text[..i + c.len_utf8()],
            Some(_) => {}
        }
    }
    text
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NotAnObject,
    MissingField(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::NotAnObject => write!(f, "Asset detail is not an object"),
            ValidationError::MissingField(field) => write!(f, "Asset detail missing {}", field),
        }
    }
}

impl std::error::Error for ValidationError {}
