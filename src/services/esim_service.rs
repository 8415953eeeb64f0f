use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::context::Context;
use crate::db;
use crate::models::{ActivationResult, Esim, EsimStatus};
use crate::utils::{Reply, Table};

/// Mark active eSIMs whose validity has run out as expired
fn refresh_status(esim: &mut Esim, now: DateTime<Utc>) {
    if esim.status == EsimStatus::Active && esim.expires_at.map_or(false, |t| t <= now) {
        esim.status = EsimStatus::Expired;
    }
}

/// eSIMs of the current user, newest first, with expiry applied
pub async fn list_esims(ctx: &Context) -> Result<Vec<Esim>, String> {
    let now = Utc::now();
    let esims = db::esim::list_esims_by_user(&ctx.pool, ctx.user_id())
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut refreshed = Vec::with_capacity(esims.len());
    for esim in esims {
        let mut probe = esim.clone();
        refresh_status(&mut probe, now);
        if probe.status != esim.status {
            let updated = db::esim::update_esim(&ctx.pool, esim.id, |e| refresh_status(e, now))
                .await
                .map_err(|e| format!("Database error: {}", e))?;
            refreshed.push(updated);
        } else {
            refreshed.push(esim);
        }
    }
    Ok(refreshed)
}

pub async fn get_esim(ctx: &Context, esim_id: i64) -> Result<Esim, String> {
    db::esim::get_esim(&ctx.pool, ctx.user_id(), esim_id)
        .await
        .map_err(|e| format!("Database error: {}", e))?
        .ok_or_else(|| format!("❌ eSIM #{} not found", esim_id))
}

/// Activate an installed eSIM; its validity window starts now
pub async fn activate_esim(ctx: &Context, esim_id: i64) -> Result<ActivationResult, String> {
    let esim = get_esim(ctx, esim_id).await?;
    match esim.status {
        EsimStatus::Active => return Err(format!("❌ eSIM #{} is already active", esim_id)),
        EsimStatus::Expired => return Err(format!("❌ eSIM #{} has expired", esim_id)),
        EsimStatus::Inactive => {}
    }

    let package = db::catalog::get_package(&ctx.pool, esim.package_id)
        .await
        .map_err(|e| format!("Database error: {}", e))?;
    let days = package.map_or(30, |p| p.validity_days());

    let now = Utc::now();
    let expires_at = now + Duration::days(days);
    let esim = db::esim::update_esim(&ctx.pool, esim_id, |e| {
        e.status = EsimStatus::Active;
        e.activated_at = Some(now);
        e.expires_at = Some(expires_at);
    })
    .await
    .map_err(|e| format!("Database error: {}", e))?;

    info!("eSIM {} activated for {} days", esim.id, days);

    Ok(ActivationResult {
        esim_id: esim.id,
        country_code: esim.country_code,
        activated_at: now.format("%Y-%m-%d %H:%M UTC").to_string(),
        expires_at: expires_at.format("%Y-%m-%d %H:%M UTC").to_string(),
    })
}

/// Write the activation payload (what the QR code encodes) to `dir`
pub async fn save_activation(ctx: &Context, esim_id: i64, dir: &Path) -> Result<PathBuf, String> {
    let esim = get_esim(ctx, esim_id).await?;
    let path = dir.join(format!("esim-{}-{}.txt", esim.id, esim.country_code.to_lowercase()));

    let contents = format!(
        "ICCID: {}\nPlan: {} {} / {}\nActivation code: {}\n",
        esim.iccid, esim.country_code, esim.data, esim.validity, esim.activation_code
    );
    tokio::fs::write(&path, contents)
        .await
        .map_err(|e| format!("❌ Failed to save activation code: {}", e))?;

    Ok(path)
}

pub fn create_esim_list_reply(esims: &[Esim]) -> Reply {
    if esims.is_empty() {
        return Reply::default()
            .title("📶 My eSIMs")
            .description("No eSIMs yet. Browse `$countries` to buy one.");
    }

    let mut table = Table::new(&["#", "Plan", "Status", "Expires"]);
    for esim in esims {
        table.add_row(vec![
            esim.id.to_string(),
            format!("{} {} / {}", esim.country_code, esim.data, esim.validity),
            esim.status.to_string(),
            esim.expires_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }

    Reply::default().title("📶 My eSIMs").description(table.render())
}

pub fn create_activation_code_reply(esim: &Esim) -> Reply {
    Reply::default()
        .title(format!("📲 Install eSIM #{}", esim.id))
        .description("Scan the QR code built from this payload, or enter it manually under Settings > Mobile data > Add eSIM.")
        .field("Activation code", &esim.activation_code, false)
        .field("ICCID", &esim.iccid, true)
        .field("Status", esim.status.to_string(), true)
        .footer(format!("`$esim {} save` writes it to a file", esim.id))
}

pub fn create_activation_reply(result: &ActivationResult) -> Reply {
    Reply::default()
        .title(format!("✅ eSIM #{} active", result.esim_id))
        .field("Country", &result.country_code, true)
        .field("Activated", &result.activated_at, true)
        .field("Expires", &result.expires_at, true)
}
