//! Wire types for the markets list (REST).

use crate::shared::serde_util::{lenient, lenient_decimal};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One raw record from `GET {base}/markets`.
///
/// Every field is optional here; required-ness is decided in conversion so a
/// single bad record can be dropped without failing the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub current_price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub market_cap: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price_change_percentage_24h: Option<Decimal>,
}
