//! Conversion: raw markets payload → `AssetSummary` list.

use super::wire::MarketRecord;
use super::{AssetSummary, ValidationError};
use crate::error::SdkError;
use crate::shared::AssetId;
use serde_json::Value;
use std::collections::HashSet;

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(ValidationError::MissingField(field)),
    }
}

impl TryFrom<MarketRecord> for AssetSummary {
    type Error = ValidationError;

    fn try_from(source: MarketRecord) -> Result<Self, Self::Error> {
        let id = required(source.id, "id")?;
        let symbol = required(source.symbol, "symbol")?;
        let name = required(source.name, "name")?;
        let current_price = source
            .current_price
            .ok_or(ValidationError::MissingField("current_price"))?;
        let market_cap = source
            .market_cap
            .ok_or(ValidationError::MissingField("market_cap"))?;

        Ok(AssetSummary {
            id: AssetId::from(id),
            symbol,
            name,
            image_url: source.image.filter(|url| !url.is_empty()),
            current_price,
            market_cap,
            price_change_pct_24h: source.price_change_percentage_24h,
        })
    }
}

/// Result of decoding one list payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedMarkets {
    /// Valid summaries, in payload order, ids unique.
    pub summaries: Vec<AssetSummary>,
    /// Records dropped for missing fields or duplicate ids.
    pub dropped: Vec<ValidationError>,
}

impl DecodedMarkets {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Decode a `GET {base}/markets` body.
///
/// The body must be a JSON array; anything else is a malformed payload. Within
/// the array, records lacking `id`, `symbol`, `name`, `current_price` or
/// `market_cap`, and records repeating an earlier id, are dropped and reported
/// in [`DecodedMarkets::dropped`].
pub fn decode_markets(payload: &Value) -> Result<DecodedMarkets, SdkError> {
    let records = payload.as_array().ok_or_else(|| {
        SdkError::MalformedPayload("markets response is not a JSON array".to_string())
    })?;

    let mut decoded = DecodedMarkets {
        summaries: Vec::with_capacity(records.len()),
        dropped: Vec::new(),
    };
    let mut seen: HashSet<AssetId> = HashSet::with_capacity(records.len());

    for raw in records {
        let summary = serde_json::from_value::<MarketRecord>(raw.clone())
            .map_err(|_| ValidationError::NotAnObject)
            .and_then(AssetSummary::try_from)
            .and_then(|summary| {
                if seen.insert(summary.id.clone()) {
                    Ok(summary)
                } else {
                    Err(ValidationError::DuplicateId(summary.id))
                }
            });

        match summary {
            Ok(summary) => decoded.summaries.push(summary),
            Err(err) => decoded.dropped.push(err),
        }
    }

    if !decoded.dropped.is_empty() {
        tracing::warn!(
            dropped = decoded.dropped.len(),
            kept = decoded.summaries.len(),
            "Dropped malformed market records"
        );
    }

    Ok(decoded)
}
