use super::{parse_id, split_card_arg};
use crate::context::Context;
use crate::services::purchase_service;
use crate::utils::Reply;

pub async fn execute(ctx: &Context, args: &[&str]) -> Result<Reply, String> {
    if args.is_empty() || args[0] == "help" {
        return Ok(Reply::default()
            .title("🛒 Buy Command")
            .description("Check out a data plan. Payment always succeeds in this demo.")
            .field("Usage", "`$buy <package id> [credit] [card <number>]`", false)
            .field(
                "Examples",
                "`$buy 5` (wallet balance, or card if the balance is short)\n\
                 `$buy 5 credit` (spend referral credit first)\n\
                 `$buy 5 card 4111 1111 1111 1111`",
                false,
            ));
    }

    let (rest, card) = split_card_arg(args);
    let (id, flags) = rest
        .split_first()
        .ok_or("❌ Please specify a package id".to_string())?;
    let package_id = parse_id(id, "package")?;
    let use_credit = flags.iter().any(|a| a.eq_ignore_ascii_case("credit"));

    let result =
        purchase_service::execute_purchase(ctx, package_id, use_credit, card.as_deref()).await?;
    Ok(purchase_service::create_purchase_reply(ctx, &result))
}
