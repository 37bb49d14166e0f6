//! Conversion: raw detail payload → `AssetDetail`.

use super::wire::{quote, quote_str, CoinResponse, MarketDataRecord};
use super::{
    first_sentence, AssetDetail, AssetImages, AssetLinks, MarketSnapshot, PriceExtreme,
    ValidationError,
};
use crate::error::SdkError;
use crate::shared::serde_util::parse_timestamp;
use crate::shared::{AssetId, Metric};
use serde_json::Value;

const DESCRIPTION_LANGUAGE: &str = "en";

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Keep the non-empty string entries of a loosely-typed list, in order.
fn string_entries(values: Option<Vec<Value>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
        .collect()
}

impl From<MarketDataRecord> for MarketSnapshot {
    fn from(source: MarketDataRecord) -> Self {
        let all_time_high = PriceExtreme {
            value: quote(&source.ath).into(),
            date: quote_str(&source.ath_date).and_then(parse_timestamp).into(),
        };
        let all_time_low = PriceExtreme {
            value: quote(&source.atl).into(),
            date: quote_str(&source.atl_date).and_then(parse_timestamp).into(),
        };

        MarketSnapshot {
            current_price: quote(&source.current_price).into(),
            market_cap: quote(&source.market_cap).into(),
            high_24h: quote(&source.high_24h).into(),
            low_24h: quote(&source.low_24h).into(),
            price_change_24h: source.price_change_24h.into(),
            price_change_pct_24h: source.price_change_percentage_24h.into(),
            circulating_supply: source.circulating_supply.into(),
            total_supply: source.total_supply.into(),
            all_time_high,
            all_time_low,
            last_updated: source.last_updated.into(),
        }
    }
}

impl TryFrom<CoinResponse> for AssetDetail {
    type Error = ValidationError;

    fn try_from(source: CoinResponse) -> Result<Self, Self::Error> {
        let id = required(source.id, "id")?;
        let name = required(source.name, "name")?;
        let symbol = required(source.symbol, "symbol")?;

        let description_summary = source
            .description
            .as_ref()
            .and_then(|d| d.get(DESCRIPTION_LANGUAGE))
            .and_then(Value::as_str)
            .map(|text| first_sentence(text).to_string())
            .unwrap_or_default();

        let image = source.image.unwrap_or_default();
        let images = AssetImages {
            thumb: non_empty(image.thumb),
            small: non_empty(image.small),
            large: non_empty(image.large),
        };

        let links = source.links.unwrap_or_default();
        let links = AssetLinks {
            homepage_urls: string_entries(links.homepage),
            blockchain_explorer_urls: string_entries(links.blockchain_site),
        };

        let mut market_data: MarketSnapshot = source.market_data.unwrap_or_default().into();
        if market_data.last_updated.is_unavailable() {
            market_data.last_updated = Metric::from(source.last_updated);
        }

        Ok(AssetDetail {
            id: AssetId::from(id),
            name,
            symbol,
            market_cap_rank: source.market_cap_rank.into(),
            description_summary,
            image_url_large: images.large.clone(),
            images,
            market_data,
            links,
            categories: string_entries(source.categories),
        })
    }
}

/// Normalize a `GET {base}/{id}` body into an [`AssetDetail`].
///
/// Only the identity fields (`id`, `name`, `symbol`) are required; their
/// absence is a malformed payload. Every other field degrades to
/// [`Metric::Unavailable`], an empty string, or an empty list.
pub fn adapt(payload: &Value) -> Result<AssetDetail, SdkError> {
    if !payload.is_object() {
        return Err(SdkError::MalformedPayload(
            ValidationError::NotAnObject.to_string(),
        ));
    }
    let raw: CoinResponse = serde_json::from_value(payload.clone())?;
    AssetDetail::try_from(raw).map_err(|e| SdkError::MalformedPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn bitcoin_payload() -> Value {
        json!({
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "market_cap_rank": 1,
            "description": {"en": "Bitcoin is the first successful internet money. It runs on a peer-to-peer network."},
            "image": {
                "thumb": "https://example.test/thumb/btc.png",
                "small": "https://example.test/small/btc.png",
                "large": "https://example.test/large/btc.png"
            },
            "links": {
                "homepage": ["http://www.bitcoin.org", "", ""],
                "blockchain_site": ["", "https://mempool.space/", "https://blockchair.com/bitcoin/", null]
            },
            "categories": ["Cryptocurrency", "Layer 1 (L1)", null],
            "market_data": {
                "current_price": {"usd": 50000, "eur": 46000},
                "market_cap": {"usd": 900000000000u64},
                "high_24h": {"usd": 51000.5},
                "low_24h": {"usd": 49000},
                "price_change_24h": -120.75,
                "price_change_percentage_24h": -0.24,
                "circulating_supply": 19675962.0,
                "total_supply": 21000000.0,
                "ath": {"usd": 69045},
                "ath_date": {"usd": "2021-11-10T14:24:11.849Z"},
                "atl": {"usd": 67.81},
                "atl_date": {"usd": "2013-07-06"},
                "last_updated": "2024-03-14T07:10:36.635Z"
            }
        })
    }

    #[test]
    fn test_adapt_full_payload() {
        let detail = adapt(&bitcoin_payload()).unwrap();
        assert_eq!(detail.id.as_str(), "bitcoin");
        assert_eq!(detail.title(), "Bitcoin (BTC)");
        assert_eq!(detail.rank_label(), "#1");
        assert_eq!(
            detail.description_summary,
            "Bitcoin is the first successful internet money."
        );
        assert_eq!(
            detail.image_url_large.as_deref(),
            Some("https://example.test/large/btc.png")
        );
        assert_eq!(detail.links.homepage_urls, ["http://www.bitcoin.org"]);
        assert_eq!(
            detail.links.blockchain_explorer_urls,
            ["https://mempool.space/", "https://blockchair.com/bitcoin/"]
        );
        assert_eq!(detail.categories, ["Cryptocurrency", "Layer 1 (L1)"]);

        let md = &detail.market_data;
        assert_eq!(md.current_price, Metric::Known(Decimal::from(50000)));
        assert_eq!(md.high_24h, Metric::Known(Decimal::from_str("51000.5").unwrap()));
        assert_eq!(md.price_change_24h, Metric::Known(Decimal::from_str("-120.75").unwrap()));
        assert_eq!(md.total_supply, Metric::Known(Decimal::from(21_000_000)));
        assert_eq!(md.all_time_high.label(), "$69,045 on 2021-11-10");
        assert_eq!(
            md.all_time_low.date,
            Metric::Known(Utc.with_ymd_and_hms(2013, 7, 6, 0, 0, 0).unwrap())
        );
        assert_eq!(md.last_updated_label(), "2024-03-14");
    }

    #[test]
    fn test_missing_circulating_supply_is_unavailable() {
        let mut payload = bitcoin_payload();
        payload["market_data"]
            .as_object_mut()
            .unwrap()
            .remove("circulating_supply");
        payload["market_data"]["total_supply"] = Value::Null;

        let detail = adapt(&payload).unwrap();
        assert_eq!(detail.market_data.circulating_supply, Metric::Unavailable);
        assert_eq!(detail.market_data.total_supply, Metric::Unavailable);
        assert_eq!(detail.market_data.circulating_supply_label(), "N/A");
    }

    #[test]
    fn test_zero_supply_stays_zero() {
        let mut payload = bitcoin_payload();
        payload["market_data"]["circulating_supply"] = json!(0);
        let detail = adapt(&payload).unwrap();
        assert_eq!(
            detail.market_data.circulating_supply,
            Metric::Known(Decimal::ZERO)
        );
    }

    #[test]
    fn test_missing_identity_is_malformed() {
        for field in ["id", "name", "symbol"] {
            let mut payload = bitcoin_payload();
            payload.as_object_mut().unwrap().remove(field);
            let err = adapt(&payload).unwrap_err();
            assert!(matches!(err, SdkError::MalformedPayload(ref m) if m.contains(field)));
        }

        let mut payload = bitcoin_payload();
        payload["symbol"] = json!("");
        assert!(matches!(adapt(&payload), Err(SdkError::MalformedPayload(_))));

        assert!(matches!(adapt(&json!([])), Err(SdkError::MalformedPayload(_))));
    }

    #[test]
    fn test_sparse_payload_degrades() {
        let detail = adapt(&json!({
            "id": "obscure",
            "symbol": "obs",
            "name": "Obscure",
            "market_cap_rank": null,
            "description": {"en": ""},
            "links": {"homepage": ["", ""], "blockchain_site": []}
        }))
        .unwrap();
        assert_eq!(detail.description_summary, "");
        assert_eq!(detail.market_cap_rank, Metric::Unavailable);
        assert_eq!(detail.rank_label(), "N/A");
        assert!(detail.links.is_empty());
        assert!(detail.categories.is_empty());
        assert_eq!(detail.image_url_large, None);
        assert_eq!(detail.market_data, MarketSnapshot::default());
        assert_eq!(detail.market_data.all_time_high.label(), "N/A");
    }

    #[test]
    fn test_last_updated_falls_back_to_top_level() {
        let detail = adapt(&json!({
            "id": "x", "symbol": "x", "name": "X",
            "last_updated": "2024-01-02 03:04:05",
            "market_data": {"current_price": {"usd": "1.5"}}
        }))
        .unwrap();
        assert_eq!(
            detail.market_data.last_updated,
            Metric::Known(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
        );
        assert_eq!(
            detail.market_data.current_price,
            Metric::Known(Decimal::from_str("1.5").unwrap())
        );
    }
}
