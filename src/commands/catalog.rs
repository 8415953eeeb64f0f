use crate::context::Context;
use crate::services::catalog_service;
use crate::utils::Reply;

pub async fn execute_countries(ctx: &Context, args: &[&str]) -> Result<Reply, String> {
    let region = if args.is_empty() {
        None
    } else {
        Some(args.join(" "))
    };

    let countries = catalog_service::list_countries(ctx, region.as_deref()).await?;
    Ok(catalog_service::create_countries_reply(&countries))
}

pub async fn execute_packages(ctx: &Context, args: &[&str]) -> Result<Reply, String> {
    let code = match args.first() {
        Some(code) => code,
        None => {
            return Ok(Reply::default()
                .title("📦 Packages Command")
                .field("Usage", "`$packages <country code>`", false)
                .field("Examples", "`$packages FR`\n`$plans jp`", false))
        }
    };

    let (country, packages) = catalog_service::list_packages(ctx, code).await?;
    Ok(catalog_service::create_packages_reply(ctx, &country, &packages))
}
