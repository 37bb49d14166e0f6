//! Human-readable formatting for prices, market figures and dates.

pub mod decimal;
pub mod num;

use chrono::{DateTime, Utc};

/// Calendar date of a timestamp, `YYYY-MM-DD`.
pub fn date(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_date() {
        let dt = Utc.with_ymd_and_hms(2021, 11, 10, 14, 24, 11).unwrap();
        assert_eq!(date(&dt), "2021-11-10");
    }
}
