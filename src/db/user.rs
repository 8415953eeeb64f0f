use super::{DbError, Pool};
use crate::models::UserRecord;

/// Get a user by id
pub async fn get_user(pool: &Pool, user_id: i64) -> Result<Option<UserRecord>, DbError> {
    let store = pool.read().await;
    Ok(store.users.get(&user_id).cloned())
}

/// Get the user owning a referral code (case-insensitive)
pub async fn get_user_by_referral_code(
    pool: &Pool,
    code: &str,
) -> Result<Option<UserRecord>, DbError> {
    let store = pool.read().await;
    Ok(store
        .users
        .values()
        .find(|u| u.referral_code.eq_ignore_ascii_case(code))
        .cloned())
}

/// Apply `change` to a user in place and return the updated record
pub async fn update_user<F>(pool: &Pool, user_id: i64, change: F) -> Result<UserRecord, DbError>
where
    F: FnOnce(&mut UserRecord),
{
    let mut store = pool.write().await;
    let user = store
        .users
        .get_mut(&user_id)
        .ok_or_else(|| DbError::not_found("user", user_id))?;
    change(user);
    Ok(user.clone())
}

/// Insert a user, assigning the next id
pub async fn create_user(pool: &Pool, mut user: UserRecord) -> Result<i64, DbError> {
    let mut store = pool.write().await;
    if store
        .users
        .values()
        .any(|u| u.referral_code.eq_ignore_ascii_case(&user.referral_code))
    {
        return Err(DbError::Conflict(format!(
            "referral code {} already taken",
            user.referral_code
        )));
    }
    let id = store.next_id("user");
    user.id = id;
    store.users.insert(id, user);
    Ok(id)
}
