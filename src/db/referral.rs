use chrono::{DateTime, Utc};

use super::{DbError, Pool};
use crate::models::{Referral, ReferralStatus};

/// Record a pending referral. A user can only be referred once, and never by
/// someone they referred.
pub async fn create_referral(
    pool: &Pool,
    referrer_id: i64,
    referee_id: i64,
    reward: f64,
    created_at: DateTime<Utc>,
) -> Result<i64, DbError> {
    let mut store = pool.write().await;
    if store.referrals.values().any(|r| r.referee_id == referee_id) {
        return Err(DbError::Conflict(format!(
            "user {} has already been referred",
            referee_id
        )));
    }
    if store
        .referrals
        .values()
        .any(|r| r.referrer_id == referee_id && r.referee_id == referrer_id)
    {
        return Err(DbError::Conflict(format!(
            "users {} and {} cannot refer each other",
            referrer_id, referee_id
        )));
    }

    let id = store.next_id("referral");
    store.referrals.insert(
        id,
        Referral {
            id,
            referrer_id,
            referee_id,
            reward,
            status: ReferralStatus::Pending,
            created_at,
            completed_at: None,
        },
    );
    Ok(id)
}

/// The referral that brought `referee_id` in, if any
pub async fn get_referral_by_referee(
    pool: &Pool,
    referee_id: i64,
) -> Result<Option<Referral>, DbError> {
    let store = pool.read().await;
    Ok(store
        .referrals
        .values()
        .find(|r| r.referee_id == referee_id)
        .cloned())
}

/// Referrals made by a user
pub async fn list_referrals_by_referrer(
    pool: &Pool,
    referrer_id: i64,
) -> Result<Vec<Referral>, DbError> {
    let store = pool.read().await;
    Ok(store
        .referrals
        .values()
        .filter(|r| r.referrer_id == referrer_id)
        .cloned()
        .collect())
}

/// Mark a pending referral completed. Completing twice is a conflict.
pub async fn complete_referral(
    pool: &Pool,
    referral_id: i64,
    completed_at: DateTime<Utc>,
) -> Result<Referral, DbError> {
    let mut store = pool.write().await;
    let referral = store
        .referrals
        .get_mut(&referral_id)
        .ok_or_else(|| DbError::not_found("referral", referral_id))?;

    if referral.status == ReferralStatus::Completed {
        return Err(DbError::Conflict(format!(
            "referral {} already completed",
            referral_id
        )));
    }

    referral.status = ReferralStatus::Completed;
    referral.completed_at = Some(completed_at);
    Ok(referral.clone())
}
