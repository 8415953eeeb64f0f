use chrono::Utc;
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use crate::context::Context;
use crate::db;
use crate::engine::{compute_card_network, default_catalog, level_standing};
use crate::models::{
    Esim, EsimStatus, PaymentMethod, PurchaseResult, Transaction, TransactionKind,
};
use crate::utils::{progress_bar, Reply};

/// SM-DP+ host that the activation string points at
pub const SMDP_HOST: &str = "rsp.esim-market.example";

/// Simulated checkout of one package. Referral credit is spent first when
/// `use_credit` is set, then wallet balance if it covers the rest, otherwise
/// the card. Payment always succeeds.
pub async fn execute_purchase(
    ctx: &Context,
    package_id: i64,
    use_credit: bool,
    card_number: Option<&str>,
) -> Result<PurchaseResult, String> {
    let user_id = ctx.user_id();

    let package = db::catalog::get_package(&ctx.pool, package_id)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| format!("❌ Package {} not found", package_id))?;

    let user = db::user::get_user(&ctx.pool, user_id)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or("❌ Current user not found".to_string())?;

    if let Some(number) = card_number {
        if compute_card_network(number).is_none() {
            return Err("❌ Card network not recognised".to_string());
        }
    }

    let price = package.price;
    let from_credit = if use_credit {
        user.credit.available_credit.min(price).max(0.0)
    } else {
        0.0
    };
    let remaining = price - from_credit;
    let (from_balance, from_card) = if card_number.is_none() && user.balance >= remaining {
        (remaining, 0.0)
    } else {
        (0.0, remaining)
    };

    let previous_level = user.credit.current_level.clone();
    let catalog = default_catalog();

    let updated = db::user::update_user(&ctx.pool, user_id, |u| {
        u.balance -= from_balance;
        u.credit.available_credit -= from_credit;
        u.credit.used_credit += from_credit;
        u.credit.total_spent += price;
        u.credit.current_level = catalog.get_traveler_level(u.credit.total_spent).key.clone();
    })
    .await
    .map_err(|e| format!("Failed to update account: {}", e))?;

    let now = Utc::now();
    let esim_id = db::esim::create_esim(
        &ctx.pool,
        Esim {
            id: 0,
            user_id,
            package_id: package.id,
            country_code: package.country_code.clone(),
            data: package.data.clone(),
            validity: package.validity.clone(),
            iccid: generate_iccid(),
            activation_code: format!(
                "LPA:1${}${}",
                SMDP_HOST,
                Uuid::new_v4().simple().to_string().to_uppercase()
            ),
            status: EsimStatus::Inactive,
            purchased_at: now,
            activated_at: None,
            expires_at: None,
        },
    )
    .await
    .map_err(|e| format!("Failed to issue eSIM: {}", e))?;

    let method = if from_card > 0.0 {
        PaymentMethod::Card
    } else if from_balance > 0.0 {
        PaymentMethod::Balance
    } else {
        PaymentMethod::Credit
    };

    let transaction_uuid = Uuid::new_v4().to_string();
    db::transaction::create_transaction(
        &ctx.pool,
        Transaction {
            uuid: transaction_uuid.clone(),
            user_id,
            kind: TransactionKind::Purchase,
            method,
            amount: price,
            bonus: 0.0,
            description: format!("{} {} / {}", package.country_code, package.data, package.validity),
            created_at: now,
        },
    )
    .await
    .map_err(|e| format!("Failed to log transaction: {}", e))?;

    crate::services::referral_service::complete_for_referee(ctx, user_id, now).await?;

    let leveled_up_from = if updated.credit.current_level != previous_level {
        info!(
            "User {} moved from {} to {}",
            user_id, previous_level, updated.credit.current_level
        );
        Some(previous_level)
    } else {
        None
    };

    Ok(PurchaseResult {
        transaction_uuid,
        esim_id,
        country_code: package.country_code,
        data: package.data,
        validity: package.validity,
        price,
        paid_with_credit: from_credit,
        paid_with_balance: from_balance,
        paid_with_card: from_card,
        standing: level_standing(catalog, updated.credit.total_spent),
        leveled_up_from,
    })
}

/// 19-digit ICCID with the telecom prefix 89
fn generate_iccid() -> String {
    let mut rng = rand::thread_rng();
    let body: String = (0..17).map(|_| rng.gen_range(0..10).to_string()).collect();
    format!("89{}", body)
}

pub fn create_purchase_reply(ctx: &Context, result: &PurchaseResult) -> Reply {
    let mut breakdown = Vec::new();
    if result.paid_with_credit > 0.0 {
        breakdown.push(format!("Credit: {}", ctx.money(result.paid_with_credit)));
    }
    if result.paid_with_balance > 0.0 {
        breakdown.push(format!("Balance: {}", ctx.money(result.paid_with_balance)));
    }
    if result.paid_with_card > 0.0 {
        breakdown.push(format!("Card: {}", ctx.money(result.paid_with_card)));
    }

    let mut reply = Reply::default()
        .title("✅ Purchase complete")
        .field("eSIM", format!("#{}", result.esim_id), true)
        .field("Plan", format!("{} {} / {}", result.country_code, result.data, result.validity), true)
        .field("Total", ctx.money(result.price), true)
        .field("Paid with", breakdown.join("\n"), false)
        .field(
            "Level",
            format!(
                "{} {}",
                result.standing.current.badge(),
                progress_bar(result.standing.progress, 20)
            ),
            false,
        );

    if let Some(previous) = &result.leveled_up_from {
        let previous_name = default_catalog()
            .get_level(previous)
            .map_or(previous.as_str(), |l| l.name.as_str());
        reply = reply.description(format!(
            "🎉 Level up! {} → {}",
            previous_name, result.standing.current.name
        ));
    }

    reply.footer(format!(
        "Transaction {} · run `$esim {}` for the install QR payload",
        result.transaction_uuid, result.esim_id
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::services::referral_service;

    async fn context() -> Context {
        Context::new(db::init_db().await, AppConfig::default())
    }

    async fn package_priced(ctx: &Context, price: f64) -> i64 {
        let mut store = ctx.pool.write().await;
        let id = store.next_id("package");
        store.packages.insert(
            id,
            crate::models::Package {
                id,
                country_code: "FR".into(),
                data: "50GB".into(),
                validity: "30 days".into(),
                price,
            },
        );
        id
    }

    #[tokio::test]
    async fn test_purchase_promotes_traveler_to_explorer() {
        let ctx = context().await;
        let package_id = package_priced(&ctx, 50.0).await;

        let result = execute_purchase(&ctx, package_id, false, None).await.expect("purchase");
        assert_eq!(result.standing.current.name, "Explorer");
        assert_eq!(result.standing.progress, 0.0);
        assert_eq!(result.leveled_up_from.as_deref(), Some("traveler"));
        let next = result.standing.next.expect("next level");
        assert_eq!(next.name, "Expert Traveler");
        assert_eq!(next.min_spent, 200.0);

        let user = db::user::get_user(&ctx.pool, 1).await.unwrap().unwrap();
        assert_eq!(user.credit.total_spent, 50.0);
        assert_eq!(user.credit.current_level, "explorer");
    }

    #[tokio::test]
    async fn test_balance_used_when_it_covers_price() {
        let ctx = context().await;
        let package_id = package_priced(&ctx, 12.0).await;

        let result = execute_purchase(&ctx, package_id, false, None).await.expect("purchase");
        assert_eq!(result.paid_with_balance, 12.0);
        assert_eq!(result.paid_with_card, 0.0);
        assert!(result.leveled_up_from.is_none());

        let user = db::user::get_user(&ctx.pool, 1).await.unwrap().unwrap();
        assert!((user.balance - 8.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_card_covers_shortfall_and_credit_goes_first() {
        let ctx = context().await;
        db::user::update_user(&ctx.pool, 1, |u| u.credit.available_credit = 5.0)
            .await
            .unwrap();
        let package_id = package_priced(&ctx, 40.0).await;

        let result = execute_purchase(&ctx, package_id, true, None).await.expect("purchase");
        assert_eq!(result.paid_with_credit, 5.0);
        assert_eq!(result.paid_with_card, 35.0);
        assert_eq!(result.paid_with_balance, 0.0);

        let user = db::user::get_user(&ctx.pool, 1).await.unwrap().unwrap();
        assert_eq!(user.credit.available_credit, 0.0);
        assert_eq!(user.credit.used_credit, 5.0);
        assert_eq!(user.balance, 20.0);
        assert_eq!(user.credit.total_spent, 40.0);
    }

    #[tokio::test]
    async fn test_first_purchase_completes_referral() {
        let ctx = context().await;
        referral_service::redeem_code(&ctx, "SAMTRIP").await.expect("redeem");
        let package_id = package_priced(&ctx, 4.0).await;

        execute_purchase(&ctx, package_id, false, None).await.expect("purchase");

        let sam = db::user::get_user(&ctx.pool, 2).await.unwrap().unwrap();
        assert_eq!(sam.credit.available_credit, 5.0);
        assert_eq!(sam.credit.pending_credit, 0.0);
    }

    #[tokio::test]
    async fn test_purchase_issues_inactive_esim() {
        let ctx = context().await;
        let result = execute_purchase(&ctx, 1, false, Some("4111 1111 1111 1111"))
            .await
            .expect("purchase");
        assert!(result.paid_with_card > 0.0);

        let esim = db::esim::get_esim(&ctx.pool, 1, result.esim_id).await.unwrap().unwrap();
        assert_eq!(esim.status, EsimStatus::Inactive);
        assert_eq!(esim.iccid.len(), 19);
        assert!(esim.activation_code.starts_with("LPA:1$rsp.esim-market.example$"));
    }

    #[tokio::test]
    async fn test_purchase_rejects_unknown_package_and_card() {
        let ctx = context().await;
        assert!(execute_purchase(&ctx, 9_999, false, None).await.is_err());
        assert!(execute_purchase(&ctx, 1, false, Some("1234")).await.is_err());
    }
}
