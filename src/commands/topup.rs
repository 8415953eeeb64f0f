use super::split_card_arg;
use crate::context::Context;
use crate::engine::topup::PRESET_AMOUNTS;
use crate::services::topup_service;
use crate::utils::Reply;

pub async fn execute(ctx: &Context, args: &[&str]) -> Result<Reply, String> {
    if args.is_empty() || args[0] == "help" {
        let presets: Vec<String> = PRESET_AMOUNTS.iter().map(|a| ctx.money(*a)).collect();
        return Ok(Reply::default()
            .title("💳 Top-up Command")
            .description(format!(
                "Add funds to your wallet. Top-ups of {} or more get {} extra.",
                ctx.money(ctx.config.top_up.threshold),
                ctx.money(ctx.config.top_up.bonus)
            ))
            .field("Usage", "`$topup <amount> [card <number>]`\n`$topup preview <amount>`", false)
            .field("Quick amounts", presets.join("  "), false));
    }

    if args[0].eq_ignore_ascii_case("preview") {
        let amount = args.get(1).ok_or("❌ Please specify an amount".to_string())?;
        let selection = topup_service::preview_top_up(ctx, amount)?;
        return Ok(topup_service::create_preview_reply(ctx, &selection));
    }

    let (rest, card) = split_card_arg(args);
    let amount = rest.first().ok_or("❌ Please specify an amount".to_string())?;
    let result = topup_service::execute_top_up(ctx, amount, card.as_deref()).await?;
    Ok(topup_service::create_top_up_reply(ctx, &result))
}
