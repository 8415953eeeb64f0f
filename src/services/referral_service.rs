use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::context::Context;
use crate::db;
use crate::models::{
    PaymentMethod, RedeemResult, ReferralStatus, ReferralSummary, Transaction, TransactionKind,
    UserCreditProfile,
};
use crate::utils::Reply;

/// Reset monthly earned credit when the calendar month has changed
pub fn roll_monthly_period(credit: &mut UserCreditProfile, now: DateTime<Utc>) {
    let period = now.format("%Y-%m").to_string();
    if credit.monthly_period != period {
        debug!(
            "Monthly credit period {} -> {}, resetting {:.2}",
            credit.monthly_period, period, credit.monthly_earned_credit
        );
        credit.monthly_period = period;
        credit.monthly_earned_credit = 0.0;
    }
}

/// Referral code, invite stats and credit balances of the current user
pub async fn get_summary(ctx: &Context) -> Result<ReferralSummary, String> {
    let user_id = ctx.user_id();
    let now = Utc::now();

    let user = db::user::update_user(&ctx.pool, user_id, |u| {
        roll_monthly_period(&mut u.credit, now)
    })
    .await
    .map_err(|e| format!("Database error: {}", e))?;

    let referrals = db::referral::list_referrals_by_referrer(&ctx.pool, user_id)
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    Ok(ReferralSummary {
        code: user.referral_code,
        invited: referrals.len(),
        completed: referrals
            .iter()
            .filter(|r| r.status == ReferralStatus::Completed)
            .count(),
        available_credit: user.credit.available_credit,
        pending_credit: user.credit.pending_credit,
        used_credit: user.credit.used_credit,
        monthly_earned_credit: user.credit.monthly_earned_credit,
    })
}

/// Link the current user to the owner of `code`. The reward is held as the
/// referrer's pending credit until this user's first purchase.
pub async fn redeem_code(ctx: &Context, code: &str) -> Result<RedeemResult, String> {
    let user_id = ctx.user_id();
    let reward = ctx.config.referral_reward;

    let referrer = db::user::get_user_by_referral_code(&ctx.pool, code)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| format!("❌ Referral code '{}' does not exist", code))?;

    if referrer.id == user_id {
        return Err("❌ You cannot redeem your own referral code".to_string());
    }
    if referrer.referred_by == Some(user_id) {
        return Err(format!(
            "❌ {} joined with your code, so you cannot redeem theirs",
            referrer.name
        ));
    }

    let purchases = db::transaction::count_purchases(&ctx.pool, user_id)
        .await
        .map_err(|e| format!("Database error: {}", e))?;
    if purchases > 0 {
        return Err("❌ Referral codes can only be redeemed before your first purchase".to_string());
    }

    db::referral::create_referral(&ctx.pool, referrer.id, user_id, reward, Utc::now())
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    db::user::update_user(&ctx.pool, user_id, |u| u.referred_by = Some(referrer.id))
        .await
        .map_err(|e| format!("Database error: {}", e))?;
    db::user::update_user(&ctx.pool, referrer.id, |u| u.credit.pending_credit += reward)
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    info!("User {} redeemed referral code of user {}", user_id, referrer.id);

    Ok(RedeemResult {
        referrer_name: referrer.name,
        reward,
    })
}

/// Release the referrer's pending reward once the referee has bought something.
/// Returns the reward released, or `None` when there was nothing pending.
pub async fn complete_for_referee(
    ctx: &Context,
    referee_id: i64,
    now: DateTime<Utc>,
) -> Result<Option<f64>, String> {
    let referral = match db::referral::get_referral_by_referee(&ctx.pool, referee_id)
        .await
        .map_err(|e| format!("Database error: {}", e))?
    {
        Some(r) if r.status == ReferralStatus::Pending => r,
        _ => return Ok(None),
    };

    let referral = db::referral::complete_referral(&ctx.pool, referral.id, now)
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let reward = referral.reward;
    db::user::update_user(&ctx.pool, referral.referrer_id, |u| {
        roll_monthly_period(&mut u.credit, now);
        u.credit.pending_credit = (u.credit.pending_credit - reward).max(0.0);
        u.credit.available_credit += reward;
        u.credit.monthly_earned_credit += reward;
    })
    .await
    .map_err(|e| format!("Database error: {}", e))?;

    db::transaction::create_transaction(
        &ctx.pool,
        Transaction {
            uuid: Uuid::new_v4().to_string(),
            user_id: referral.referrer_id,
            kind: TransactionKind::ReferralReward,
            method: PaymentMethod::Credit,
            amount: reward,
            bonus: 0.0,
            description: format!("Referral reward for user {}", referee_id),
            created_at: now,
        },
    )
    .await
    .map_err(|e| format!("Failed to log referral reward: {}", e))?;

    info!(
        "Referral {} completed, {:.2} credit released to user {}",
        referral.id, reward, referral.referrer_id
    );
    Ok(Some(reward))
}

pub fn create_summary_reply(ctx: &Context, summary: &ReferralSummary) -> Reply {
    Reply::default()
        .title("🎁 Refer a friend")
        .description(format!(
            "Share your code. Friends who redeem it and buy their first eSIM earn you {}.",
            ctx.money(ctx.config.referral_reward)
        ))
        .field("Your code", &summary.code, true)
        .field("Invited", summary.invited.to_string(), true)
        .field("Completed", summary.completed.to_string(), true)
        .field(
            "Credit",
            format!(
                "Available: {}\nPending: {}\nUsed: {}\nEarned this month: {}",
                ctx.money(summary.available_credit),
                ctx.money(summary.pending_credit),
                ctx.money(summary.used_credit),
                ctx.money(summary.monthly_earned_credit),
            ),
            false,
        )
}
