use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// Parses a plain decimal literal without losing digits. Inputs that do not
/// fit in 28 significant digits are rejected rather than rounded.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let body = s.strip_prefix(['-', '+']).unwrap_or(s);
    if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    Decimal::from_str_exact(s).ok()
}

pub fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_amount(&s).ok_or_else(|| serde::de::Error::custom(format!("Invalid amount format: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::parse_amount;
    use rust_decimal::Decimal;

    #[test]
    fn parses_exact_literals() {
        assert_eq!(parse_amount("1100"), Some(Decimal::from(1100)));
        assert_eq!(parse_amount(" 12.345 "), Some(Decimal::new(12345, 3)));
        assert_eq!(parse_amount("-0.5"), Some(Decimal::new(-5, 1)));
        assert_eq!(parse_amount("+7"), Some(Decimal::from(7)));
    }

    #[test]
    fn rejects_malformed_literals() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("-"), None);
        assert_eq!(parse_amount("1e3"), None);
        assert_eq!(parse_amount("12.3.4"), None);
        assert_eq!(parse_amount("abc"), None);
        // more fractional digits than Decimal can hold
        assert_eq!(parse_amount("0.00000000000000000000000000001"), None);
    }
}
