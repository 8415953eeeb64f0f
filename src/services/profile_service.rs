use tracing::debug;

use crate::context::Context;
use crate::db;
use crate::engine::{default_catalog, level_standing};
use crate::models::{ProfileResult, Transaction, TransactionKind, UserSettings};
use crate::utils::{progress_bar, Align, Reply, Table};

pub const LANGUAGES: [&str; 5] = ["en", "es", "fr", "de", "it"];
pub const CURRENCIES: [&str; 3] = ["EUR", "USD", "GBP"];

/// Profile screen data for the current user
pub async fn get_profile(ctx: &Context) -> Result<ProfileResult, String> {
    let user_id = ctx.user_id();
    let user = db::user::get_user(&ctx.pool, user_id)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or("❌ Current user not found".to_string())?;

    let esims = db::esim::list_esims_by_user(&ctx.pool, user_id)
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    // negative spend never reaches the engine
    let total_spent = user.credit.total_spent.max(0.0);

    Ok(ProfileResult {
        name: user.name,
        email: user.email,
        balance: user.balance,
        total_spent,
        standing: level_standing(default_catalog(), total_spent),
        esim_count: esims.len(),
    })
}

/// Change one setting: `language`, `currency` or `notifications`
pub async fn update_setting(ctx: &Context, key: &str, value: &str) -> Result<UserSettings, String> {
    let key = key.to_lowercase();
    let value = value.trim();

    let apply: Box<dyn FnOnce(&mut UserSettings) + Send> = match key.as_str() {
        "language" | "lang" => {
            let lang = value.to_lowercase();
            if !LANGUAGES.contains(&lang.as_str()) {
                return Err(format!("❌ Language must be one of: {}", LANGUAGES.join(", ")));
            }
            Box::new(move |s| s.language = lang)
        }
        "currency" => {
            let currency = value.to_uppercase();
            if !CURRENCIES.contains(&currency.as_str()) {
                return Err(format!("❌ Currency must be one of: {}", CURRENCIES.join(", ")));
            }
            Box::new(move |s| s.currency = currency)
        }
        "notifications" | "notify" => {
            let enabled = match value.to_lowercase().as_str() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                _ => return Err("❌ Notifications must be `on` or `off`".to_string()),
            };
            Box::new(move |s| s.notifications = enabled)
        }
        _ => return Err(format!("❌ Unknown setting '{}'", key)),
    };

    let user = db::user::update_user(&ctx.pool, ctx.user_id(), |u| apply(&mut u.settings))
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    debug!("User {} updated setting {}", user.id, key);
    Ok(user.settings)
}

pub async fn get_settings(ctx: &Context) -> Result<UserSettings, String> {
    db::user::get_user(&ctx.pool, ctx.user_id())
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .map(|u| u.settings)
        .ok_or("❌ Current user not found".to_string())
}

/// Wallet history of the current user, newest first
pub async fn get_history(ctx: &Context) -> Result<Vec<Transaction>, String> {
    db::transaction::list_transactions_by_user(&ctx.pool, ctx.user_id())
        .await
        .map_err(|e| format!("Failed to fetch transactions: {}", e))
}

/// History as pretty JSON, for exporting
pub fn export_history(transactions: &[Transaction]) -> Result<String, String> {
    serde_json::to_string_pretty(transactions)
        .map_err(|e| format!("❌ Failed to export transactions: {}", e))
}

pub fn create_history_reply(ctx: &Context, transactions: &[Transaction]) -> Reply {
    if transactions.is_empty() {
        return Reply::default()
            .title("📋 Transaction history")
            .description("No transactions found");
    }

    let mut table = Table::new(&["Date", "Type", "Description", "Amount"]).align(3, Align::Right);
    for tx in transactions {
        let (kind, signed) = match tx.kind {
            TransactionKind::TopUp => ("top-up", tx.amount + tx.bonus),
            TransactionKind::Purchase => ("purchase", -tx.amount),
            TransactionKind::ReferralReward => ("referral", tx.amount),
        };
        table.add_row(vec![
            tx.created_at.format("%Y-%m-%d %H:%M").to_string(),
            kind.to_string(),
            tx.description.clone(),
            ctx.money(signed),
        ]);
    }

    Reply::default()
        .title("📋 Transaction history")
        .description(table.render())
}

pub fn create_profile_reply(ctx: &Context, profile: &ProfileResult) -> Reply {
    let standing = &profile.standing;

    let next = match (&standing.next, standing.remaining) {
        (Some(next), Some(remaining)) => format!(
            "{} at {} spent ({} to go)",
            next.badge(),
            ctx.money(next.min_spent),
            ctx.money(remaining)
        ),
        _ => "You've reached the top level".to_string(),
    };

    Reply::default()
        .title(format!("👤 {}", profile.name))
        .description(&profile.email)
        .field("Balance", ctx.money(profile.balance), true)
        .field("Total spent", ctx.money(profile.total_spent), true)
        .field("eSIMs", profile.esim_count.to_string(), true)
        .field(
            "Level",
            format!("{}\n{}", standing.current.badge(), progress_bar(standing.progress, 20)),
            false,
        )
        .field("Next level", next, false)
}

/// Every level with its spend range and benefits
pub fn create_levels_reply(ctx: &Context, total_spent: f64) -> Reply {
    let catalog = default_catalog();
    let current = catalog.get_traveler_level(total_spent);
    let mut reply = Reply::default().title("🏅 Traveler levels");

    for level in catalog.levels() {
        let range = match level.max_spent {
            Some(max) => format!("{} up to {}", ctx.money(level.min_spent), ctx.money(max)),
            None => format!("{}+", ctx.money(level.min_spent)),
        };
        let marker = if level.key == current.key { " (you)" } else { "" };
        let benefits: Vec<String> = level.benefits.iter().map(|b| format!("• {}", b)).collect();

        reply = reply.field(
            format!("{}{}", level.badge(), marker),
            format!("{}\n{}\n{}", range, level.description, benefits.join("\n")),
            false,
        );
    }
    reply
}

pub fn create_settings_reply(settings: &UserSettings) -> Reply {
    Reply::default()
        .title("⚙️ Settings")
        .field("Language", &settings.language, true)
        .field("Currency", &settings.currency, true)
        .field(
            "Notifications",
            if settings.notifications { "on" } else { "off" },
            true,
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    async fn context(user_id: i64) -> Context {
        Context::new(
            db::init_db().await,
            AppConfig {
                current_user_id: user_id,
                ..AppConfig::default()
            },
        )
    }

    #[tokio::test]
    async fn test_new_user_profile() {
        let profile = get_profile(&context(1).await).await.expect("profile");
        assert_eq!(profile.standing.current.name, "Traveler");
        assert_eq!(profile.standing.progress, 0.0);
        assert_eq!(profile.standing.remaining, Some(50.0));
    }

    #[tokio::test]
    async fn test_mid_tier_profile() {
        // seeded with 120 spent
        let profile = get_profile(&context(2).await).await.expect("profile");
        assert_eq!(profile.standing.current.key, "explorer");
        assert!((profile.standing.progress - 70.0 / 150.0 * 100.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        assert!(get_profile(&context(42).await).await.is_err());
    }

    #[tokio::test]
    async fn test_history_starts_empty() {
        let ctx = context(1).await;
        assert!(get_history(&ctx).await.unwrap().is_empty());
        let reply = create_history_reply(&ctx, &[]).render();
        assert!(reply.contains("No transactions found"));
    }

    #[test]
    fn test_export_history_as_json() {
        let tx = Transaction {
            uuid: "abc".to_string(),
            user_id: 1,
            kind: TransactionKind::TopUp,
            method: crate::models::PaymentMethod::Card,
            amount: 100.0,
            bonus: 5.0,
            description: "Wallet top-up".to_string(),
            created_at: chrono::Utc::now(),
        };
        let json = export_history(&[tx]).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["bonus"], 5.0);
        assert_eq!(parsed[0]["uuid"], "abc");
    }

    #[tokio::test]
    async fn test_update_settings() {
        let ctx = context(1).await;
        let settings = update_setting(&ctx, "language", "FR").await.expect("language");
        assert_eq!(settings.language, "fr");

        let settings = update_setting(&ctx, "notifications", "off").await.expect("notify");
        assert!(!settings.notifications);
        assert_eq!(get_settings(&ctx).await.unwrap().language, "fr");

        assert!(update_setting(&ctx, "currency", "BTC").await.is_err());
        assert!(update_setting(&ctx, "theme", "dark").await.is_err());
    }
}
