//! User, credit and settings records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credit fields kept on every user. `current_level` is a cached copy of the
/// tier key derived from `total_spent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCreditProfile {
    pub total_spent: f64,
    pub available_credit: f64,
    pub pending_credit: f64,
    pub used_credit: f64,
    pub monthly_earned_credit: f64,
    /// Calendar month (UTC, "YYYY-MM") that `monthly_earned_credit` counts
    pub monthly_period: String,
    pub current_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub language: String,
    pub currency: String,
    pub notifications: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        UserSettings {
            language: "en".to_string(),
            currency: "EUR".to_string(),
            notifications: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Wallet balance available for checkout
    pub balance: f64,
    pub referral_code: String,
    pub referred_by: Option<i64>,
    pub credit: UserCreditProfile,
    pub settings: UserSettings,
    pub created_at: DateTime<Utc>,
}
