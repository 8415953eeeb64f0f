use crate::context::Context;
use crate::services::profile_service;
use crate::utils::Reply;

pub async fn execute(ctx: &Context, args: &[&str]) -> Result<Reply, String> {
    if args.first().map_or(false, |a| *a == "help") {
        return Ok(Reply::default()
            .title("👤 Profile Command")
            .description("Shows your wallet balance, traveler level and progress to the next level")
            .field("Usage", "`$profile` or `$me`", false));
    }

    let profile = profile_service::get_profile(ctx).await?;
    Ok(profile_service::create_profile_reply(ctx, &profile))
}

pub async fn execute_levels(ctx: &Context) -> Result<Reply, String> {
    let profile = profile_service::get_profile(ctx).await?;
    Ok(profile_service::create_levels_reply(ctx, profile.total_spent))
}

pub async fn execute_history(ctx: &Context, args: &[&str]) -> Result<Reply, String> {
    let transactions = profile_service::get_history(ctx).await?;

    if args.first().map_or(false, |a| a.eq_ignore_ascii_case("json")) {
        return Ok(Reply::default()
            .title("📋 Transaction export")
            .description(profile_service::export_history(&transactions)?));
    }
    Ok(profile_service::create_history_reply(ctx, &transactions))
}
