//! Balance and top-up models

/// Result of a completed top-up
#[derive(Debug, Clone)]
pub struct TopUpResult {
    pub transaction_uuid: String,
    pub amount: f64,
    pub bonus: f64,
    pub final_total: f64,
    pub new_balance: f64,
    pub card: Option<String>,
}
