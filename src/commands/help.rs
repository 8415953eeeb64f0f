use crate::context::Context;
use crate::utils::Reply;

pub async fn execute(ctx: &Context) -> Result<Reply, String> {
    let rule = ctx.config.top_up;

    Ok(Reply::default()
        .title("📖 eSIM Market Commands")
        .description("Buy travel data plans, manage your wallet and climb the traveler levels.")
        .field(
            "🌐 Browse",
            "`$countries [region]` - List destinations\n`$packages <code>` - Plans for a destination",
            false,
        )
        .field(
            "🛒 Checkout",
            "`$buy <id> [credit] [card <number>]` - Buy a plan (payment is simulated)\n`$card <number>` - Detect card network",
            false,
        )
        .field(
            "📶 eSIMs",
            "`$esims` - Your eSIMs\n`$esim <id> [save]` - Activation QR payload\n`$activate <id>` - Start the validity window",
            false,
        )
        .field(
            "💳 Wallet",
            format!(
                "`$topup <amount> [card <number>]` - Add funds ({} bonus from {})\n`$topup preview <amount>` - Show bonus without paying\n`$history [json]` - Transactions",
                ctx.money(rule.bonus),
                ctx.money(rule.threshold)
            ),
            false,
        )
        .field(
            "👤 Account",
            "`$profile` - Balance and level\n`$level` - All traveler levels\n`$referral [redeem <code>]` - Referral credit\n`$settings [language|currency|notifications <value>]`",
            false,
        )
        .field(
            "🪟 Sheets",
            "`$sheet <offset...> [anywhere|handle|scrolltop] [at <y>] [scroll <px>]` - Replay a drag on a bottom sheet",
            false,
        ))
}
