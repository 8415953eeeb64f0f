//! Checkout models

use crate::engine::LevelStanding;

/// Result of a simulated checkout
#[derive(Debug, Clone)]
pub struct PurchaseResult {
    pub transaction_uuid: String,
    pub esim_id: i64,
    pub country_code: String,
    pub data: String,
    pub validity: String,
    pub price: f64,
    pub paid_with_credit: f64,
    pub paid_with_balance: f64,
    pub paid_with_card: f64,
    pub standing: LevelStanding,
    /// Set when this purchase moved the user into a new tier
    pub leveled_up_from: Option<String>,
}

/// Profile screen data
#[derive(Debug, Clone)]
pub struct ProfileResult {
    pub name: String,
    pub email: String,
    pub balance: f64,
    pub total_spent: f64,
    pub standing: LevelStanding,
    pub esim_count: usize,
}
