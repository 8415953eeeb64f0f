use super::{DbError, Pool};
use crate::models::Esim;

/// Insert an eSIM, assigning the next id
pub async fn create_esim(pool: &Pool, mut esim: Esim) -> Result<i64, DbError> {
    let mut store = pool.write().await;
    let id = store.next_id("esim");
    esim.id = id;
    store.esims.insert(id, esim);
    Ok(id)
}

/// Get an eSIM owned by `user_id`
pub async fn get_esim(pool: &Pool, user_id: i64, esim_id: i64) -> Result<Option<Esim>, DbError> {
    let store = pool.read().await;
    Ok(store
        .esims
        .get(&esim_id)
        .filter(|e| e.user_id == user_id)
        .cloned())
}

/// All eSIMs of a user, newest first
pub async fn list_esims_by_user(pool: &Pool, user_id: i64) -> Result<Vec<Esim>, DbError> {
    let store = pool.read().await;
    Ok(store
        .esims
        .values()
        .rev()
        .filter(|e| e.user_id == user_id)
        .cloned()
        .collect())
}

/// Apply `change` to an eSIM and return the updated record
pub async fn update_esim<F>(pool: &Pool, esim_id: i64, change: F) -> Result<Esim, DbError>
where
    F: FnOnce(&mut Esim),
{
    let mut store = pool.write().await;
    let esim = store
        .esims
        .get_mut(&esim_id)
        .ok_or_else(|| DbError::not_found("esim", esim_id))?;
    change(esim);
    Ok(esim.clone())
}
