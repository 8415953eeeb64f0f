//! eSIM models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EsimStatus {
    Inactive,
    Active,
    Expired,
}

impl fmt::Display for EsimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EsimStatus::Inactive => "inactive",
            EsimStatus::Active => "active",
            EsimStatus::Expired => "expired",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Esim {
    pub id: i64,
    pub user_id: i64,
    pub package_id: i64,
    pub country_code: String,
    pub data: String,
    pub validity: String,
    pub iccid: String,
    /// LPA string encoded in the installation QR code
    pub activation_code: String,
    pub status: EsimStatus,
    pub purchased_at: DateTime<Utc>,
    pub activated_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Result of activating an eSIM
#[derive(Debug)]
pub struct ActivationResult {
    pub esim_id: i64,
    pub country_code: String,
    pub activated_at: String,
    pub expires_at: String,
}
