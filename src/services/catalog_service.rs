use crate::context::Context;
use crate::db;
use crate::models::{Country, Package};
use crate::utils::{Align, Reply, Table};

pub async fn list_countries(ctx: &Context, region: Option<&str>) -> Result<Vec<Country>, String> {
    let countries = db::catalog::list_countries(&ctx.pool, region)
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    if countries.is_empty() {
        return Err(format!("❌ No destinations in region '{}'", region.unwrap_or_default()));
    }
    Ok(countries)
}

/// Country plus its packages, cheapest first
pub async fn list_packages(ctx: &Context, country_code: &str) -> Result<(Country, Vec<Package>), String> {
    let country = db::catalog::get_country(&ctx.pool, country_code)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| format!("❌ Country '{}' not found", country_code.to_uppercase()))?;

    let packages = db::catalog::list_packages(&ctx.pool, &country.code)
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    Ok((country, packages))
}

pub fn create_countries_reply(countries: &[Country]) -> Reply {
    let mut table = Table::new(&["Code", "Destination", "Region"]);
    for country in countries {
        table.add_row(vec![
            country.code.clone(),
            format!("{} {}", country.flag, country.name),
            country.region.clone(),
        ]);
    }

    Reply::default()
        .title("🌐 Destinations")
        .description(table.render())
        .footer("`$packages <code>` shows plans for a destination")
}

pub fn create_packages_reply(ctx: &Context, country: &Country, packages: &[Package]) -> Reply {
    let mut table = Table::new(&["ID", "Data", "Validity", "Price"]).align(3, Align::Right);
    for package in packages {
        table.add_row(vec![
            package.id.to_string(),
            package.data.clone(),
            package.validity.clone(),
            ctx.money(package.price),
        ]);
    }

    Reply::default()
        .title(format!("{} {} plans", country.flag, country.name))
        .description(table.render())
        .footer("`$buy <id> [credit] [card <number>]` to check out")
}
