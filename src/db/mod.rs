//! In-memory data store behind async accessor functions.
//!
//! Every record lives in a single `MemoryStore` guarded by a tokio `RwLock`.
//! Ids auto-increment per table. Nothing is persisted.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::engine::get_traveler_level;
use crate::models::{
    Country, Esim, Package, Referral, Transaction, UserCreditProfile, UserRecord, UserSettings,
};

pub mod catalog;
pub mod esim;
pub mod referral;
pub mod transaction;
pub mod user;

#[derive(Debug, Error, PartialEq)]
pub enum DbError {
    #[error("record error: {entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("record error: {0}")]
    Conflict(String),
}

impl DbError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DbError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) users: BTreeMap<i64, UserRecord>,
    pub(crate) countries: Vec<Country>,
    pub(crate) packages: BTreeMap<i64, Package>,
    pub(crate) esims: BTreeMap<i64, Esim>,
    pub(crate) referrals: BTreeMap<i64, Referral>,
    pub(crate) transactions: Vec<Transaction>,
    next_id: BTreeMap<&'static str, i64>,
}

impl MemoryStore {
    /// Next auto-increment id for `table`, starting at 1
    pub(crate) fn next_id(&mut self, table: &'static str) -> i64 {
        let id = self.next_id.entry(table).or_insert(0);
        *id += 1;
        *id
    }
}

pub type Pool = Arc<RwLock<MemoryStore>>;

/// Create the store and load the demo fixtures
pub async fn init_db() -> Pool {
    let mut store = MemoryStore::default();
    seed(&mut store);

    info!(
        "Seeded {} users, {} countries, {} packages",
        store.users.len(),
        store.countries.len(),
        store.packages.len()
    );

    Arc::new(RwLock::new(store))
}

/// Empty store, for tests that build their own fixtures
pub fn empty_pool() -> Pool {
    Arc::new(RwLock::new(MemoryStore::default()))
}

fn seed(store: &mut MemoryStore) {
    let now = Utc::now();
    let period = now.format("%Y-%m").to_string();

    let users = [
        ("Alex Rivera", "alex@example.com", 20.0, "ALEX5", 0.0),
        ("Sam Okafor", "sam@example.com", 45.0, "SAMTRIP", 120.0),
    ];
    for (name, email, balance, code, spent) in users {
        let id = store.next_id("user");
        store.users.insert(
            id,
            UserRecord {
                id,
                name: name.to_string(),
                email: email.to_string(),
                balance,
                referral_code: code.to_string(),
                referred_by: None,
                credit: UserCreditProfile {
                    total_spent: spent,
                    available_credit: 0.0,
                    pending_credit: 0.0,
                    used_credit: 0.0,
                    monthly_earned_credit: 0.0,
                    monthly_period: period.clone(),
                    current_level: get_traveler_level(spent).key.clone(),
                },
                settings: UserSettings::default(),
                created_at: now,
            },
        );
    }

    let countries = [
        ("FR", "France", "🇫🇷", "Europe", 1.0),
        ("ES", "Spain", "🇪🇸", "Europe", 1.0),
        ("IT", "Italy", "🇮🇹", "Europe", 1.0),
        ("DE", "Germany", "🇩🇪", "Europe", 1.1),
        ("GB", "United Kingdom", "🇬🇧", "Europe", 1.2),
        ("TR", "Turkey", "🇹🇷", "Europe", 1.3),
        ("US", "United States", "🇺🇸", "Americas", 1.5),
        ("MX", "Mexico", "🇲🇽", "Americas", 1.4),
        ("JP", "Japan", "🇯🇵", "Asia", 1.6),
        ("TH", "Thailand", "🇹🇭", "Asia", 0.9),
        ("AE", "United Arab Emirates", "🇦🇪", "Middle East", 2.0),
    ];
    // (data, validity, base price)
    let tiers = [
        ("1GB", "7 days", 4.5),
        ("5GB", "30 days", 12.99),
        ("10GB", "30 days", 19.99),
        ("20GB", "30 days", 29.99),
    ];

    for (code, name, flag, region, multiplier) in countries {
        store.countries.push(Country {
            code: code.to_string(),
            name: name.to_string(),
            flag: flag.to_string(),
            region: region.to_string(),
        });

        for (data, validity, base) in tiers {
            let id = store.next_id("package");
            let price = ((base * multiplier) * 100.0_f64).round() / 100.0;
            store.packages.insert(
                id,
                Package {
                    id,
                    country_code: code.to_string(),
                    data: data.to_string(),
                    validity: validity.to_string(),
                    price,
                },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_is_consistent() {
        let pool = init_db().await;
        let store = pool.read().await;

        assert!(store.users.contains_key(&1));
        for user in store.users.values() {
            assert_eq!(
                user.credit.current_level,
                get_traveler_level(user.credit.total_spent).key
            );
        }
        for package in store.packages.values() {
            assert!(package.price > 0.0);
            assert!(store.countries.iter().any(|c| c.code == package.country_code));
        }
    }

    #[test]
    fn test_ids_increment_per_table() {
        let mut store = MemoryStore::default();
        assert_eq!(store.next_id("esim"), 1);
        assert_eq!(store.next_id("esim"), 2);
        assert_eq!(store.next_id("referral"), 1);
    }

    #[tokio::test]
    async fn test_create_user_rejects_taken_code() {
        let pool = init_db().await;
        let mut user = user::get_user(&pool, 1).await.unwrap().unwrap();
        user.name = "Alex Clone".to_string();

        let err = user::create_user(&pool, user.clone()).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict(_)));

        user.referral_code = "NEWCODE".to_string();
        let id = user::create_user(&pool, user).await.expect("insert");
        assert_eq!(id, 3);
        assert!(user::get_user_by_referral_code(&pool, "newcode").await.unwrap().is_some());
    }
}
