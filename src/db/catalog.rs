use super::{DbError, Pool};
use crate::models::{Country, Package};

/// List countries, optionally limited to one region (case-insensitive)
pub async fn list_countries(pool: &Pool, region: Option<&str>) -> Result<Vec<Country>, DbError> {
    let store = pool.read().await;
    Ok(store
        .countries
        .iter()
        .filter(|c| region.map_or(true, |r| c.region.eq_ignore_ascii_case(r)))
        .cloned()
        .collect())
}

/// Get a country by its two-letter code
pub async fn get_country(pool: &Pool, code: &str) -> Result<Option<Country>, DbError> {
    let store = pool.read().await;
    Ok(store
        .countries
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
        .cloned())
}

/// List the packages sold for a country, cheapest first
pub async fn list_packages(pool: &Pool, country_code: &str) -> Result<Vec<Package>, DbError> {
    let store = pool.read().await;
    let mut packages: Vec<Package> = store
        .packages
        .values()
        .filter(|p| p.country_code.eq_ignore_ascii_case(country_code))
        .cloned()
        .collect();
    packages.sort_by(|a, b| a.price.total_cmp(&b.price));
    Ok(packages)
}

/// Get a package by id
pub async fn get_package(pool: &Pool, package_id: i64) -> Result<Option<Package>, DbError> {
    let store = pool.read().await;
    Ok(store.packages.get(&package_id).cloned())
}
