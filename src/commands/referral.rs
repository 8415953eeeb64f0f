use crate::context::Context;
use crate::services::referral_service;
use crate::utils::Reply;

pub async fn execute(ctx: &Context, args: &[&str]) -> Result<Reply, String> {
    match args {
        [] => {
            let summary = referral_service::get_summary(ctx).await?;
            Ok(referral_service::create_summary_reply(ctx, &summary))
        }
        [action, code] if action.eq_ignore_ascii_case("redeem") => {
            let result = referral_service::redeem_code(ctx, code).await?;
            Ok(Reply::default()
                .title("🎁 Code redeemed")
                .description(format!(
                    "{} will receive {} once you buy your first eSIM.",
                    result.referrer_name,
                    ctx.money(result.reward)
                )))
        }
        _ => Ok(Reply::default()
            .title("🎁 Referral Command")
            .field("Usage", "`$referral`\n`$referral redeem <code>`", false)),
    }
}
