use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::context::Context;
use crate::db;
use crate::engine::card::mask_card_number;
use crate::engine::{compute_card_network, TopUpSelection};
use crate::models::{PaymentMethod, TopUpResult, Transaction, TransactionKind};
use crate::utils::{parse_positive_amount, Reply};

/// Parse what the user typed and derive bonus and total, without charging anything
pub fn preview_top_up(ctx: &Context, amount: &str) -> Result<TopUpSelection, String> {
    let amount = parse_positive_amount(amount).map_err(|e| format!("❌ {}", e))?;
    ctx.config
        .top_up
        .select(amount)
        .ok_or_else(|| "❌ Invalid top-up amount".to_string())
}

/// Charge the card (simulated) and credit amount plus bonus to the wallet
pub async fn execute_top_up(
    ctx: &Context,
    amount: &str,
    card_number: Option<&str>,
) -> Result<TopUpResult, String> {
    let selection = preview_top_up(ctx, amount)?;
    let user_id = ctx.user_id();

    let card = match card_number {
        Some(number) => {
            let network = compute_card_network(number)
                .ok_or("❌ Card network not recognised".to_string())?;
            Some(format!("{} {}", network, mask_card_number(number)))
        }
        None => None,
    };

    let user = db::user::update_user(&ctx.pool, user_id, |u| u.balance += selection.final_total)
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let transaction_uuid = Uuid::new_v4().to_string();
    db::transaction::create_transaction(
        &ctx.pool,
        Transaction {
            uuid: transaction_uuid.clone(),
            user_id,
            kind: TransactionKind::TopUp,
            method: PaymentMethod::Card,
            amount: selection.amount,
            bonus: selection.bonus,
            description: "Wallet top-up".to_string(),
            created_at: Utc::now(),
        },
    )
    .await
    .map_err(|e| format!("Failed to log transaction: {}", e))?;

    info!(
        "User {} topped up {:.2} (+{:.2} bonus)",
        user_id, selection.amount, selection.bonus
    );

    Ok(TopUpResult {
        transaction_uuid,
        amount: selection.amount,
        bonus: selection.bonus,
        final_total: selection.final_total,
        new_balance: user.balance,
        card,
    })
}

pub fn create_top_up_reply(ctx: &Context, result: &TopUpResult) -> Reply {
    let mut reply = Reply::default()
        .title("💳 Top-up successful")
        .field("Amount", ctx.money(result.amount), true)
        .field("Bonus", ctx.money(result.bonus), true)
        .field("Credited", ctx.money(result.final_total), true)
        .field("New balance", ctx.money(result.new_balance), false);

    if let Some(card) = &result.card {
        reply = reply.field("Charged to", card, false);
    }
    reply.footer(format!("Transaction {}", result.transaction_uuid))
}

pub fn create_preview_reply(ctx: &Context, selection: &TopUpSelection) -> Reply {
    let rule = ctx.config.top_up;
    let hint = if selection.bonus > 0.0 {
        format!("You get {} extra!", ctx.money(selection.bonus))
    } else {
        format!(
            "Top up {} or more to get {} extra",
            ctx.money(rule.threshold),
            ctx.money(rule.bonus)
        )
    };

    Reply::default()
        .title("💳 Top-up preview")
        .field("Amount", ctx.money(selection.amount), true)
        .field("Bonus", ctx.money(selection.bonus), true)
        .field("Total", ctx.money(selection.final_total), true)
        .description(hint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    async fn context() -> Context {
        Context::new(db::init_db().await, AppConfig::default())
    }

    #[tokio::test]
    async fn test_top_up_with_bonus() {
        let ctx = context().await;
        let result = execute_top_up(&ctx, "€100", None).await.expect("top-up");
        assert_eq!(result.bonus, 5.0);
        assert_eq!(result.final_total, 105.0);
        assert_eq!(result.new_balance, 125.0);
    }

    #[tokio::test]
    async fn test_top_up_below_threshold() {
        let ctx = context().await;
        let result = execute_top_up(&ctx, "80", Some("5500000000000004"))
            .await
            .expect("top-up");
        assert_eq!(result.bonus, 0.0);
        assert_eq!(result.final_total, 80.0);
        assert_eq!(result.card.as_deref(), Some("Mastercard •••• 0004"));

        let transactions = db::transaction::list_transactions_by_user(&ctx.pool, 1)
            .await
            .unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].kind, TransactionKind::TopUp);
    }

    #[tokio::test]
    async fn test_invalid_amounts_do_not_touch_balance() {
        let ctx = context().await;
        assert!(execute_top_up(&ctx, "abc", None).await.is_err());
        assert!(execute_top_up(&ctx, "-10", None).await.is_err());
        assert!(execute_top_up(&ctx, "50", Some("9999")).await.is_err());

        let user = db::user::get_user(&ctx.pool, 1).await.unwrap().unwrap();
        assert_eq!(user.balance, 20.0);
    }

    #[test]
    fn test_preview_uses_configured_rule() {
        let ctx = Context::new(
            db::empty_pool(),
            AppConfig {
                top_up: crate::engine::TopUpRule { threshold: 30.0, bonus: 3.0 },
                ..AppConfig::default()
            },
        );
        assert_eq!(preview_top_up(&ctx, "30").unwrap().final_total, 33.0);
        assert_eq!(preview_top_up(&ctx, "29.99").unwrap().bonus, 0.0);
    }
}
