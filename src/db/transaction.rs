use super::{DbError, Pool};
use crate::models::Transaction;

/// Append a transaction record
pub async fn create_transaction(pool: &Pool, transaction: Transaction) -> Result<(), DbError> {
    let mut store = pool.write().await;
    if store.transactions.iter().any(|t| t.uuid == transaction.uuid) {
        return Err(DbError::Conflict(format!(
            "transaction {} already exists",
            transaction.uuid
        )));
    }
    store.transactions.push(transaction);
    Ok(())
}

/// Transactions of a user, newest first
pub async fn list_transactions_by_user(
    pool: &Pool,
    user_id: i64,
) -> Result<Vec<Transaction>, DbError> {
    let store = pool.read().await;
    Ok(store
        .transactions
        .iter()
        .rev()
        .filter(|t| t.user_id == user_id)
        .cloned()
        .collect())
}

/// Count of purchases a user has completed
pub async fn count_purchases(pool: &Pool, user_id: i64) -> Result<usize, DbError> {
    let store = pool.read().await;
    Ok(store
        .transactions
        .iter()
        .filter(|t| t.user_id == user_id && t.kind == crate::models::TransactionKind::Purchase)
        .count())
}
