//! Referral models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferralStatus {
    /// Code redeemed, reward held as pending credit
    Pending,
    /// Referee made a purchase, reward released
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Referral {
    pub id: i64,
    pub referrer_id: i64,
    pub referee_id: i64,
    pub reward: f64,
    pub status: ReferralStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Referral screen data
#[derive(Debug)]
pub struct ReferralSummary {
    pub code: String,
    pub invited: usize,
    pub completed: usize,
    pub available_credit: f64,
    pub pending_credit: f64,
    pub used_credit: f64,
    pub monthly_earned_credit: f64,
}

/// Result of redeeming someone's code
#[derive(Debug)]
pub struct RedeemResult {
    pub referrer_name: String,
    pub reward: f64,
}
