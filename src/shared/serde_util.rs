//! Custom serde helpers for the market-data wire formats.
//!
//! The upstream API is loose about types: numbers may be `null`, strings may be
//! empty, nested objects may be missing. Wire structs route every optional field
//! through [`lenient`] / [`lenient_decimal`] so a single odd field never aborts
//! decoding of the whole payload.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

/// Deserializes any field into `Option<T>`, yielding `None` when the field is
/// `null` or has an unexpected shape.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Deserializes a JSON number or numeric string into `Option<Decimal>`.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

/// Converts a loosely-typed JSON value into a `Decimal`.
///
/// Accepts integers, floats (including exponent notation such as `1e-7`) and
/// numeric strings. Anything else is `None`.
pub fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Decimal::from(i));
            }
            if let Some(u) = n.as_u64() {
                return Some(Decimal::from(u));
            }
            parse_decimal(&n.to_string())
        }
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Normalizes a timestamp string into `DateTime<Utc>`.
///
/// Accepted forms, in order: RFC 3339 (`2024-03-14T07:10:36.635Z`), naive
/// date-times with `T` or space separators (read as UTC), bare dates
/// (`2013-07-06`, midnight UTC), and integer epoch milliseconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive));
    }

    raw.parse::<i64>()
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
}

/// Deserializes a timestamp in any of the [`parse_timestamp`] forms (or a JSON
/// epoch-millis number) into `Option<DateTime<Utc>>`.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => parse_timestamp(&s),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "lenient")]
        rank: Option<u32>,
        #[serde(default, deserialize_with = "lenient_decimal")]
        price: Option<Decimal>,
        #[serde(default, deserialize_with = "lenient_timestamp")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_lenient_tolerates_wrong_shapes() {
        let record: Record =
            serde_json::from_value(json!({"rank": "first", "price": {"usd": 1}, "at": true}))
                .unwrap();
        assert_eq!(record.rank, None);
        assert_eq!(record.price, None);
        assert_eq!(record.at, None);
    }

    #[test]
    fn test_lenient_missing_and_null() {
        let record: Record = serde_json::from_value(json!({"rank": null})).unwrap();
        assert_eq!(record.rank, None);
        assert_eq!(record.price, None);
    }

    #[test]
    fn test_decimal_from_numbers_and_strings() {
        assert_eq!(decimal_from_value(&json!(50000)), Some(Decimal::from(50000)));
        assert_eq!(
            decimal_from_value(&json!(-1.2)),
            Some(Decimal::from_str("-1.2").unwrap())
        );
        assert_eq!(
            decimal_from_value(&json!(1e-7)),
            Some(Decimal::from_str("0.0000001").unwrap())
        );
        assert_eq!(
            decimal_from_value(&json!("2.5")),
            Some(Decimal::from_str("2.5").unwrap())
        );
        assert_eq!(decimal_from_value(&json!("")), None);
        assert_eq!(decimal_from_value(&json!(null)), None);
    }

    #[test]
    fn test_parse_timestamp_formats_agree() {
        let expected = Utc.with_ymd_and_hms(2021, 11, 10, 14, 24, 11).unwrap();
        assert_eq!(parse_timestamp("2021-11-10T14:24:11Z"), Some(expected));
        assert_eq!(parse_timestamp("2021-11-10T14:24:11.000+00:00"), Some(expected));
        assert_eq!(parse_timestamp("2021-11-10 14:24:11"), Some(expected));
        assert_eq!(parse_timestamp("2021-11-10T14:24:11"), Some(expected));
        assert_eq!(parse_timestamp("1636554251000"), Some(expected));
    }

    #[test]
    fn test_parse_timestamp_bare_date_and_garbage() {
        let midnight = Utc.with_ymd_and_hms(2013, 7, 6, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2013-07-06"), Some(midnight));
        assert_eq!(parse_timestamp("last tuesday"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
