//! Card network detection from the issuer prefix.
//!
//! Prefix only. No Luhn checksum is run, so a number that classifies here can
//! still be rejected by a real processor.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardNetwork {
    Visa,
    Mastercard,
    Amex,
    Discover,
}

impl fmt::Display for CardNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CardNetwork::Visa => "Visa",
            CardNetwork::Mastercard => "Mastercard",
            CardNetwork::Amex => "American Express",
            CardNetwork::Discover => "Discover",
        };
        write!(f, "{}", name)
    }
}

/// Classify a card number by its IIN prefix. Spaces and dashes are ignored,
/// any other non-digit makes the number unclassifiable.
pub fn compute_card_network(card_number: &str) -> Option<CardNetwork> {
    let digits: String = card_number
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    if digits.starts_with('4') {
        return Some(CardNetwork::Visa);
    }
    if digits.starts_with("34") || digits.starts_with("37") {
        return Some(CardNetwork::Amex);
    }
    if digits.starts_with('5') {
        return Some(CardNetwork::Mastercard);
    }
    if digits.len() >= 4 {
        if let Ok(prefix) = digits[..4].parse::<u32>() {
            if (2221..=2720).contains(&prefix) {
                return Some(CardNetwork::Mastercard);
            }
        }
    }
    if digits.starts_with('6') {
        return Some(CardNetwork::Discover);
    }

    None
}

/// Mask all but the last four digits, e.g. "•••• 1111"
pub fn mask_card_number(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().filter(|c| c.is_ascii_digit()).collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("•••• {}", tail)
}
