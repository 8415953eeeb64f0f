pub mod buy;
pub mod card;
pub mod catalog;
pub mod esim;
pub mod help;
pub mod profile;
pub mod referral;
pub mod settings;
pub mod sheet;
pub mod topup;

use tracing::{debug, warn};

use crate::context::Context;
use crate::db;
use crate::utils::{extract_clean_error, Reply};

/// Parse one input line and run the matching command.
/// Returns the rendered reply, or `None` for lines that are not commands.
pub async fn handle_message(ctx: &Context, content: &str) -> Option<String> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    let (&command, args) = parts.split_first()?;
    let command = command.to_lowercase();

    debug!("Command {} with {} args", command, args.len());

    // amounts follow the currency picked in `$settings`
    let ctx = match db::user::get_user(&ctx.pool, ctx.user_id()).await {
        Ok(Some(user)) => ctx.with_currency(&user.settings.currency),
        _ => ctx.clone(),
    };
    let ctx = &ctx;

    let result = match command.as_str() {
        "$help" | "$h" => help::execute(ctx).await,
        "$profile" | "$me" => profile::execute(ctx, args).await,
        "$level" | "$levels" => profile::execute_levels(ctx).await,
        "$history" | "$tx" => profile::execute_history(ctx, args).await,
        "$countries" | "$destinations" => catalog::execute_countries(ctx, args).await,
        "$packages" | "$plans" => catalog::execute_packages(ctx, args).await,
        "$buy" | "$checkout" => buy::execute(ctx, args).await,
        "$topup" | "$top" => topup::execute(ctx, args).await,
        "$esims" => esim::execute_list(ctx).await,
        "$esim" | "$qr" => esim::execute_show(ctx, args).await,
        "$activate" => esim::execute_activate(ctx, args).await,
        "$referral" | "$ref" => referral::execute(ctx, args).await,
        "$settings" | "$set" => settings::execute(ctx, args).await,
        "$card" => card::execute(ctx, args).await,
        "$sheet" => sheet::execute(ctx, args).await,
        _ if command.starts_with('$') => Err(format!(
            "❌ Unknown command `{}`. Type `$help` for the list.",
            command
        )),
        _ => return None,
    };

    let reply = match result {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Error executing command {}: {}", command, e);
            let clean_error = extract_clean_error(&e);
            let message = if clean_error.is_empty() {
                "❌ An error occurred while executing the command.".to_string()
            } else if clean_error.starts_with('❌') {
                clean_error
            } else {
                format!("❌ {}", clean_error)
            };
            Reply::default().title("Command Error").description(message)
        }
    };

    Some(reply.render())
}

/// Split `args` at a `card` keyword: tokens before it, and the card number after it
pub(crate) fn split_card_arg<'a>(args: &[&'a str]) -> (Vec<&'a str>, Option<String>) {
    match args.iter().position(|a| a.eq_ignore_ascii_case("card")) {
        Some(index) => {
            let number = args[index + 1..].concat();
            let number = if number.is_empty() { None } else { Some(number) };
            (args[..index].to_vec(), number)
        }
        None => (args.to_vec(), None),
    }
}

pub(crate) fn parse_id(input: &str, what: &str) -> Result<i64, String> {
    input
        .trim_start_matches('#')
        .parse::<i64>()
        .map_err(|_| format!("❌ Invalid {} id: {}", what, input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::db;

    async fn context() -> Context {
        Context::new(db::init_db().await, AppConfig::default())
    }

    #[test]
    fn test_split_card_arg() {
        let (rest, card) = split_card_arg(&["12", "credit", "card", "4111", "1111", "1111", "1111"]);
        assert_eq!(rest, vec!["12", "credit"]);
        assert_eq!(card.as_deref(), Some("4111111111111111"));

        let (rest, card) = split_card_arg(&["100"]);
        assert_eq!(rest, vec!["100"]);
        assert!(card.is_none());
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("#12", "eSIM"), Ok(12));
        assert!(parse_id("abc", "eSIM").is_err());
    }

    #[tokio::test]
    async fn test_plain_text_is_ignored() {
        let ctx = context().await;
        assert!(handle_message(&ctx, "hello there").await.is_none());
        assert!(handle_message(&ctx, "   ").await.is_none());
    }

    #[tokio::test]
    async fn test_errors_become_replies() {
        let ctx = context().await;
        let out = handle_message(&ctx, "$activate 77").await.expect("reply");
        assert!(out.contains("Command Error"));
        assert!(out.contains("eSIM #77 not found"));

        let out = handle_message(&ctx, "$nope").await.expect("reply");
        assert!(out.contains("Unknown command"));
    }

    #[tokio::test]
    async fn test_top_up_then_profile_flow() {
        let ctx = context().await;
        let out = handle_message(&ctx, "$topup €100").await.expect("reply");
        assert!(out.contains("Bonus: €5.00"));
        assert!(out.contains("Credited: €105.00"));

        let out = handle_message(&ctx, "$profile").await.expect("reply");
        assert!(out.contains("Balance: €125.00"));
        assert!(out.contains("Traveler"));
    }

    #[tokio::test]
    async fn test_currency_setting_changes_displayed_symbol() {
        let ctx = context().await;
        let out = handle_message(&ctx, "$settings currency usd").await.expect("reply");
        assert!(out.contains("Currency: USD"));

        let out = handle_message(&ctx, "$profile").await.expect("reply");
        assert!(out.contains("Balance: $20.00"));

        handle_message(&ctx, "$settings currency GBP").await;
        let out = handle_message(&ctx, "$topup preview 100").await.expect("reply");
        assert!(out.contains("Bonus: £5.00"));
    }

    #[tokio::test]
    async fn test_buy_levels_up() {
        let ctx = context().await;
        // the Emirates 20GB plan is priced above the Explorer floor
        let (_, packages) = crate::services::catalog_service::list_packages(&ctx, "AE")
            .await
            .unwrap();
        let priciest = packages.last().unwrap();
        assert!(priciest.price >= 50.0);

        let out = handle_message(&ctx, &format!("$buy {}", priciest.id)).await.expect("reply");
        assert!(out.contains("Purchase complete"));
        assert!(out.contains("Level up! Traveler → Explorer"));
    }

    #[tokio::test]
    async fn test_sheet_replay_from_shell() {
        let mut config = AppConfig::default();
        config.sheet = config.sheet.with_animation(std::time::Duration::from_millis(1));
        let ctx = Context::new(db::empty_pool(), config);

        let out = handle_message(&ctx, "$sheet 20 60 140").await.expect("reply");
        assert!(out.contains("Closed after"));

        let out = handle_message(&ctx, "$sheet 50 150 handle at 200").await.expect("reply");
        assert!(out.contains("Drag not started"));

        let out = handle_message(&ctx, "$sheet 20 x").await.expect("reply");
        assert!(out.contains("Invalid offset"));

        for bad in ["$sheet 20 nan", "$sheet inf", "$sheet 20 scroll NaN"] {
            let out = handle_message(&ctx, bad).await.expect("reply");
            assert!(out.contains("Command Error"), "{} was accepted", bad);
        }
    }
}
