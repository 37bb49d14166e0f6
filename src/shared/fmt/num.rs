//! String-level number formatting: thousands separators and trailing zeros.

/// Inserts `,` between every three digits of the integer part.
///
/// The input is a plain decimal string as produced by `Decimal::to_string`
/// (optional leading `-`, optional fractional part).
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Drops trailing fractional zeros (and a dangling `.`).
pub fn trim_fraction(formatted: &str) -> &str {
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands_integers() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("123456"), "123,456");
        assert_eq!(group_thousands("900000000000"), "900,000,000,000");
    }

    #[test]
    fn test_group_thousands_sign_and_fraction() {
        assert_eq!(group_thousands("-1234.56"), "-1,234.56");
        assert_eq!(group_thousands("-999"), "-999");
        assert_eq!(group_thousands("1234567.0001"), "1,234,567.0001");
    }

    #[test]
    fn test_trim_fraction() {
        assert_eq!(trim_fraction("1.500"), "1.5");
        assert_eq!(trim_fraction("100.00"), "100");
        assert_eq!(trim_fraction("100"), "100");
    }
}
