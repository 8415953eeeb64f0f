//! Destination and package records

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2
    pub code: String,
    pub name: String,
    pub flag: String,
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub id: i64,
    pub country_code: String,
    /// Data allowance label, e.g. "5GB"
    pub data: String,
    /// Validity label, e.g. "30 days"
    pub validity: String,
    pub price: f64,
}

impl Package {
    /// Days parsed from the validity label; unlabelled packages last 30 days
    pub fn validity_days(&self) -> i64 {
        self.validity
            .split_whitespace()
            .next()
            .and_then(|n| n.parse().ok())
            .unwrap_or(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(validity: &str) -> Package {
        Package {
            id: 1,
            country_code: "FR".into(),
            data: "1GB".into(),
            validity: validity.into(),
            price: 4.5,
        }
    }

    #[test]
    fn test_validity_days() {
        assert_eq!(package("7 days").validity_days(), 7);
        assert_eq!(package("15 Days").validity_days(), 15);
        assert_eq!(package("unlimited").validity_days(), 30);
    }
}
