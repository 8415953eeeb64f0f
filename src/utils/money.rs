//! Parsing and display of price strings such as "€12.99"

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MoneyParseError {
    #[error("Amount is empty")]
    Empty,
    #[error("'{0}' is not a valid amount")]
    Invalid(String),
    #[error("Amount must be positive")]
    NotPositive,
}

/// Split an optional leading currency symbol from the numeric body.
/// Accepts "100", "€100", "$ 99.50", "€1,250.00" (thousands separators).
pub fn parse_amount(input: &str) -> Result<(Option<String>, f64), MoneyParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MoneyParseError::Empty);
    }

    let body_start = trimmed
        .char_indices()
        .find(|(_, c)| c.is_ascii_digit() || *c == '.' || *c == '-')
        .map(|(i, _)| i)
        .ok_or_else(|| MoneyParseError::Invalid(trimmed.to_string()))?;

    let symbol = trimmed[..body_start].trim();
    let body: String = trimmed[body_start..].chars().filter(|c| *c != ',').collect();

    let amount: f64 = body
        .parse()
        .map_err(|_| MoneyParseError::Invalid(trimmed.to_string()))?;
    if !amount.is_finite() {
        return Err(MoneyParseError::Invalid(trimmed.to_string()));
    }

    let symbol = if symbol.is_empty() {
        None
    } else {
        Some(symbol.to_string())
    };
    Ok((symbol, amount))
}

/// Parse a user-entered amount that must be strictly positive
pub fn parse_positive_amount(input: &str) -> Result<f64, MoneyParseError> {
    let (_, amount) = parse_amount(input)?;
    if amount <= 0.0 {
        return Err(MoneyParseError::NotPositive);
    }
    Ok(amount)
}

/// Display symbol for a currency code the settings accept
pub fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_uppercase().as_str() {
        "EUR" => Some("€"),
        "USD" => Some("$"),
        "GBP" => Some("£"),
        _ => None,
    }
}

pub fn format_money(symbol: &str, amount: f64) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", symbol, amount.abs())
    } else {
        format!("{}{:.2}", symbol, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_symbol() {
        assert_eq!(parse_amount("100"), Ok((None, 100.0)));
        assert_eq!(parse_amount("€12.99"), Ok((Some("€".into()), 12.99)));
        assert_eq!(parse_amount("$ 1,250.50"), Ok((Some("$".into()), 1250.5)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_amount(""), Err(MoneyParseError::Empty));
        assert!(matches!(parse_amount("€abc"), Err(MoneyParseError::Invalid(_))));
        assert!(matches!(parse_amount("12.3.4"), Err(MoneyParseError::Invalid(_))));
        assert_eq!(parse_positive_amount("-5"), Err(MoneyParseError::NotPositive));
        assert_eq!(parse_positive_amount("€0"), Err(MoneyParseError::NotPositive));
    }

    #[test]
    fn test_format() {
        assert_eq!(format_money("€", 105.0), "€105.00");
        assert_eq!(format_money("€", -3.5), "-€3.50");
    }

    #[test]
    fn test_currency_symbols() {
        assert_eq!(currency_symbol("usd"), Some("$"));
        assert_eq!(currency_symbol("GBP"), Some("£"));
        assert_eq!(currency_symbol("BTC"), None);
    }
}
