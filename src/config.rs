use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

use crate::engine::topup::{TopUpRule, DEFAULT_BONUS_AMOUNT, DEFAULT_BONUS_THRESHOLD};
use crate::gesture::controller::{
    is_positive_distance, SheetGestureConfig, DEFAULT_ANIMATION_MS, DEFAULT_CAP_DISTANCE,
    DEFAULT_CLOSE_THRESHOLD, DEFAULT_FADE_DISTANCE, DEFAULT_MIN_OPACITY,
};

pub const DEFAULT_USER_ID: i64 = 1;
pub const DEFAULT_REFERRAL_REWARD: f64 = 5.0;
pub const DEFAULT_CURRENCY_SYMBOL: &str = "€";

/// Runtime settings, read once at startup from the environment (and `.env`)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub current_user_id: i64,
    pub top_up: TopUpRule,
    pub sheet: SheetGestureConfig,
    pub referral_reward: f64,
    pub currency_symbol: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            current_user_id: DEFAULT_USER_ID,
            top_up: TopUpRule::default(),
            sheet: SheetGestureConfig::default(),
            referral_reward: DEFAULT_REFERRAL_REWARD,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; missing or malformed values keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: f64| parse_or(&lookup, key, default);
        let distance = |key: &str, default: f64| {
            let value = read(key, default);
            if is_positive_distance(value) {
                value
            } else {
                warn!("Ignoring {}={}, must be a positive distance", key, value);
                default
            }
        };

        let sheet = SheetGestureConfig {
            close_threshold: distance("SHEET_CLOSE_THRESHOLD", DEFAULT_CLOSE_THRESHOLD),
            cap_distance: distance("SHEET_CAP_DISTANCE", DEFAULT_CAP_DISTANCE),
            fade_distance: distance("SHEET_FADE_DISTANCE", DEFAULT_FADE_DISTANCE),
            min_opacity: read("SHEET_MIN_OPACITY", DEFAULT_MIN_OPACITY).clamp(0.0, 1.0),
            animation: Duration::from_millis(parse_or(
                &lookup,
                "SHEET_ANIMATION_MS",
                DEFAULT_ANIMATION_MS,
            )),
            ..SheetGestureConfig::default()
        };

        AppConfig {
            current_user_id: parse_or(&lookup, "CURRENT_USER_ID", DEFAULT_USER_ID),
            top_up: TopUpRule {
                threshold: read("TOPUP_BONUS_THRESHOLD", DEFAULT_BONUS_THRESHOLD),
                bonus: read("TOPUP_BONUS_AMOUNT", DEFAULT_BONUS_AMOUNT),
            },
            sheet,
            referral_reward: read("REFERRAL_REWARD", DEFAULT_REFERRAL_REWARD),
            currency_symbol: lookup("CURRENCY_SYMBOL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}
