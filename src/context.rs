use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Pool;
use crate::gesture::ScrollLock;
use crate::utils::{currency_symbol, format_money};

/// Shared handles passed to every command and service
#[derive(Clone)]
pub struct Context {
    pub pool: Pool,
    pub config: Arc<AppConfig>,
    /// Page-level lock held by whichever sheets are open
    pub scroll_lock: ScrollLock,
    currency_symbol: String,
}

impl Context {
    pub fn new(pool: Pool, config: AppConfig) -> Self {
        Context {
            pool,
            currency_symbol: config.currency_symbol.clone(),
            config: Arc::new(config),
            scroll_lock: ScrollLock::new(),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.config.current_user_id
    }

    /// Same handles, formatting amounts in the user's chosen currency.
    /// Unknown codes keep the configured symbol.
    pub fn with_currency(&self, code: &str) -> Self {
        let mut ctx = self.clone();
        if let Some(symbol) = currency_symbol(code) {
            ctx.currency_symbol = symbol.to_string();
        }
        ctx
    }

    pub fn money(&self, amount: f64) -> String {
        format_money(&self.currency_symbol, amount)
    }
}
