//! Query construction: user options in, concrete API requests out.
//!
//! [`build`] is the list-request builder: it validates a result limit and fixes
//! everything else the transport needs (USD denomination, first page,
//! market-cap-descending order, no sparkline). The transport order is
//! independent of [`SortKey`]: re-sorting happens locally on the fetched page.

use crate::error::SdkError;
use crate::network::{DEFAULT_COIN_API_URL, DEFAULT_MARKETS_URL};
use crate::shared::AssetId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─── ResultLimit ─────────────────────────────────────────────────────────────

/// How many assets the list request asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ResultLimit {
    Five,
    #[default]
    Ten,
    Twenty,
    Fifty,
    Hundred,
}

impl ResultLimit {
    pub const ALL: [ResultLimit; 5] = [
        ResultLimit::Five,
        ResultLimit::Ten,
        ResultLimit::Twenty,
        ResultLimit::Fifty,
        ResultLimit::Hundred,
    ];

    pub fn as_u32(&self) -> u32 {
        match self {
            ResultLimit::Five => 5,
            ResultLimit::Ten => 10,
            ResultLimit::Twenty => 20,
            ResultLimit::Fifty => 50,
            ResultLimit::Hundred => 100,
        }
    }
}

impl TryFrom<u32> for ResultLimit {
    type Error = SdkError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        ResultLimit::ALL
            .into_iter()
            .find(|limit| limit.as_u32() == value)
            .ok_or_else(|| {
                SdkError::InvalidOption(format!(
                    "result limit {value} is not one of 5, 10, 20, 50, 100"
                ))
            })
    }
}

impl From<ResultLimit> for u32 {
    fn from(limit: ResultLimit) -> Self {
        limit.as_u32()
    }
}

impl FromStr for ResultLimit {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s
            .trim()
            .parse()
            .map_err(|_| SdkError::InvalidOption(format!("result limit {s:?} is not a number")))?;
        ResultLimit::try_from(value)
    }
}

impl fmt::Display for ResultLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

// ─── SortKey ─────────────────────────────────────────────────────────────────

/// Local ordering applied to the fetched page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    MarketCapDesc,
    MarketCapAsc,
    PriceDesc,
    PriceAsc,
    ChangeDesc,
    ChangeAsc,
}

/// The summary field a [`SortKey`] orders by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    MarketCap,
    CurrentPrice,
    PriceChangePct24h,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::MarketCapDesc,
        SortKey::MarketCapAsc,
        SortKey::PriceDesc,
        SortKey::PriceAsc,
        SortKey::ChangeDesc,
        SortKey::ChangeAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::MarketCapDesc => "market_cap_desc",
            SortKey::MarketCapAsc => "market_cap_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::PriceAsc => "price_asc",
            SortKey::ChangeDesc => "change_desc",
            SortKey::ChangeAsc => "change_asc",
        }
    }

    /// Selector label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::MarketCapDesc => "Market Cap (High To Low)",
            SortKey::MarketCapAsc => "Market Cap (Low To High)",
            SortKey::PriceDesc => "Price (High To Low)",
            SortKey::PriceAsc => "Price (Low To High)",
            SortKey::ChangeDesc => "24h Change (High To Low)",
            SortKey::ChangeAsc => "24h Change (Low To High)",
        }
    }

    pub fn field(&self) -> SortField {
        match self {
            SortKey::MarketCapDesc | SortKey::MarketCapAsc => SortField::MarketCap,
            SortKey::PriceDesc | SortKey::PriceAsc => SortField::CurrentPrice,
            SortKey::ChangeDesc | SortKey::ChangeAsc => SortField::PriceChangePct24h,
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(
            self,
            SortKey::MarketCapDesc | SortKey::PriceDesc | SortKey::ChangeDesc
        )
    }

    /// The same field in the opposite direction.
    pub fn reversed(&self) -> SortKey {
        match self {
            SortKey::MarketCapDesc => SortKey::MarketCapAsc,
            SortKey::MarketCapAsc => SortKey::MarketCapDesc,
            SortKey::PriceDesc => SortKey::PriceAsc,
            SortKey::PriceAsc => SortKey::PriceDesc,
            SortKey::ChangeDesc => SortKey::ChangeAsc,
            SortKey::ChangeAsc => SortKey::ChangeDesc,
        }
    }
}

impl FromStr for SortKey {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| SdkError::InvalidOption(format!("unknown sort key {s:?}")))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── QueryOptions ────────────────────────────────────────────────────────────

/// User-selected options. Owned by the UI; read-only to the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    pub result_limit: ResultLimit,
    pub sort_key: SortKey,
    pub filter_text: String,
}

// ─── Request descriptors ─────────────────────────────────────────────────────

/// Denomination currency. USD is the only one the dashboard requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Currency {
    #[default]
    Usd,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
        }
    }
}

/// Server-side ordering of the list page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TransportOrder {
    #[default]
    MarketCapDesc,
}

impl TransportOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportOrder::MarketCapDesc => "market_cap_desc",
        }
    }
}

/// The markets list request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarketsQuery {
    pub vs_currency: Currency,
    pub order: TransportOrder,
    pub per_page: ResultLimit,
    pub page: u32,
    pub sparkline: bool,
}

/// Days of history requested for the price chart.
pub const CHART_DAYS: u32 = 7;

/// The price-history request for one asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChartQuery {
    pub id: AssetId,
    pub vs_currency: Currency,
    pub days: u32,
}

/// Independently tracked fetch lifecycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Markets,
    Asset,
    PriceChart,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Markets => "markets",
            Slot::Asset => "asset",
            Slot::PriceChart => "price_chart",
        }
    }

    /// Stable message published when this slot's fetch fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Slot::Markets => "Failed to fetch data",
            Slot::Asset => "Failed to fetch coin",
            Slot::PriceChart => "Failed to fetch chart data",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A concrete API request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RequestDescriptor {
    Markets(MarketsQuery),
    Asset(AssetId),
    PriceChart(ChartQuery),
}

impl RequestDescriptor {
    /// The slot whose lifecycle this request drives.
    pub fn slot(&self) -> Slot {
        match self {
            RequestDescriptor::Markets(_) => Slot::Markets,
            RequestDescriptor::Asset(_) => Slot::Asset,
            RequestDescriptor::PriceChart(_) => Slot::PriceChart,
        }
    }

    pub fn url(&self, endpoints: &Endpoints) -> String {
        match self {
            RequestDescriptor::Markets(q) => format!(
                "{}/markets?vs_currency={}&order={}&per_page={}&page={}&sparkline={}",
                endpoints.markets_url,
                q.vs_currency.as_str(),
                q.order.as_str(),
                q.per_page.as_u32(),
                q.page,
                q.sparkline
            ),
            RequestDescriptor::Asset(id) => format!(
                "{}/{}",
                endpoints.coin_api_url,
                urlencoding::encode(id.as_str())
            ),
            RequestDescriptor::PriceChart(q) => format!(
                "{}/{}/market_chart?vs_currency={}&days={}",
                endpoints.coin_api_url,
                urlencoding::encode(q.id.as_str()),
                q.vs_currency.as_str(),
                q.days
            ),
        }
    }
}

/// Base URLs for the two endpoint families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub markets_url: String,
    pub coin_api_url: String,
}

impl Endpoints {
    pub fn new(markets_url: &str, coin_api_url: &str) -> Self {
        Self {
            markets_url: markets_url.trim_end_matches('/').to_string(),
            coin_api_url: coin_api_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_MARKETS_URL, DEFAULT_COIN_API_URL)
    }
}

// ─── Builders ────────────────────────────────────────────────────────────────

/// Build the list request for a raw result limit.
///
/// Fails with [`SdkError::InvalidOption`] unless `result_limit` is one of
/// 5, 10, 20, 50 or 100.
pub fn build(result_limit: u32) -> Result<RequestDescriptor, SdkError> {
    Ok(markets(ResultLimit::try_from(result_limit)?))
}

/// Build the list request for an already-validated limit.
pub fn markets(per_page: ResultLimit) -> RequestDescriptor {
    RequestDescriptor::Markets(MarketsQuery {
        vs_currency: Currency::Usd,
        order: TransportOrder::MarketCapDesc,
        per_page,
        page: 1,
        sparkline: false,
    })
}

pub fn asset(id: impl Into<AssetId>) -> RequestDescriptor {
    RequestDescriptor::Asset(id.into())
}

pub fn price_chart(id: impl Into<AssetId>) -> RequestDescriptor {
    RequestDescriptor::PriceChart(ChartQuery {
        id: id.into(),
        vs_currency: Currency::Usd,
        days: CHART_DAYS,
    })
}
