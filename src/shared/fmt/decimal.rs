//! Decimal formatting utilities for human-readable display.
//!
//! Handles `rust_decimal::Decimal` values with automatic decimal-place
//! detection, thousands separators, fixed-precision figures and abbreviated
//! suffixes (K/M/B/T).

use super::num::{group_thousands, trim_fraction};
use rust_decimal::{Decimal, RoundingStrategy};

const SUFFIXES: [(u64, &str); 4] = [
    (1_000_000_000_000, "T"),
    (1_000_000_000, "B"),
    (1_000_000, "M"),
    (1_000, "K"),
];

fn round(value: &Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Decimal places worth showing: two at or above one, otherwise enough to keep
/// four significant digits (capped at eight).
fn auto_places(value: &Decimal) -> u32 {
    let abs = value.abs().normalize();
    if abs.is_zero() || abs >= Decimal::ONE {
        return 2;
    }
    let mantissa = abs.mantissa().unsigned_abs();
    let digits = mantissa.ilog10() + 1;
    let leading_zeros = abs.scale().saturating_sub(digits);
    (leading_zeros + 4).min(8)
}

/// Format a `Decimal` with separators and auto-detected precision.
pub fn display(value: &Decimal) -> String {
    let rounded = round(value, auto_places(value));
    group_thousands(trim_fraction(&rounded.to_string()))
}

/// Format a `Decimal` with exactly `dp` fractional digits and separators.
pub fn fixed(value: &Decimal, dp: usize) -> String {
    let rounded = round(value, dp as u32);
    group_thousands(&format!("{:.dp$}", rounded, dp = dp))
}

/// Dollar amount, e.g. `$50,000` or `-$0.1234`.
pub fn usd(value: &Decimal) -> String {
    if value.is_sign_negative() && !value.is_zero() {
        format!("-${}", display(&value.abs()))
    } else {
        format!("${}", display(value))
    }
}

/// Percentage with two decimals, e.g. `2.50%`.
pub fn percent(value: &Decimal) -> String {
    format!("{}%", fixed(value, 2))
}

/// Abbreviate a `Decimal` with K/M/B/T suffixes.
pub fn abbr(value: &Decimal, digits: usize) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = value.abs();

    for (threshold, suffix) in SUFFIXES {
        let threshold = Decimal::from(threshold);
        if abs >= threshold {
            let scaled = round(&(abs / threshold), digits as u32);
            return format!("{sign}{:.digits$}{suffix}", scaled, digits = digits);
        }
    }
    format!("{sign}{:.digits$}", round(&abs, digits as u32), digits = digits)
}
