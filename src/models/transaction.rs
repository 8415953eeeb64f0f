//! Wallet transaction models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    TopUp,
    Purchase,
    ReferralReward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Balance,
    Credit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub uuid: String,
    pub user_id: i64,
    pub kind: TransactionKind,
    pub method: PaymentMethod,
    pub amount: f64,
    pub bonus: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
