use std::path::Path;

use super::parse_id;
use crate::context::Context;
use crate::services::esim_service;
use crate::utils::Reply;

pub async fn execute_list(ctx: &Context) -> Result<Reply, String> {
    let esims = esim_service::list_esims(ctx).await?;
    Ok(esim_service::create_esim_list_reply(&esims))
}

pub async fn execute_show(ctx: &Context, args: &[&str]) -> Result<Reply, String> {
    let id = args.first().ok_or("❌ Usage: `$esim <id> [save]`".to_string())?;
    let esim_id = parse_id(id, "eSIM")?;

    if args.get(1).map_or(false, |a| a.eq_ignore_ascii_case("save")) {
        let path = esim_service::save_activation(ctx, esim_id, Path::new(".")).await?;
        return Ok(Reply::default()
            .title("💾 Activation code saved")
            .description(path.display().to_string()));
    }

    let esim = esim_service::get_esim(ctx, esim_id).await?;
    Ok(esim_service::create_activation_code_reply(&esim))
}

pub async fn execute_activate(ctx: &Context, args: &[&str]) -> Result<Reply, String> {
    let id = args.first().ok_or("❌ Usage: `$activate <id>`".to_string())?;
    let result = esim_service::activate_esim(ctx, parse_id(id, "eSIM")?).await?;
    Ok(esim_service::create_activation_reply(&result))
}
