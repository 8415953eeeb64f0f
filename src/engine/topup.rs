//! Top-up bonus rules

use serde::Serialize;

/// Top-ups at or above this amount earn the bonus
pub const DEFAULT_BONUS_THRESHOLD: f64 = 100.0;
/// Flat bonus credited on qualifying top-ups
pub const DEFAULT_BONUS_AMOUNT: f64 = 5.0;
/// Quick-pick amounts offered by the top-up sheet
pub const PRESET_AMOUNTS: [f64; 4] = [10.0, 25.0, 50.0, 100.0];

/// Step-function bonus: a fixed amount once the threshold is met, nothing below it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopUpRule {
    pub threshold: f64,
    pub bonus: f64,
}

impl Default for TopUpRule {
    fn default() -> Self {
        TopUpRule {
            threshold: DEFAULT_BONUS_THRESHOLD,
            bonus: DEFAULT_BONUS_AMOUNT,
        }
    }
}

impl TopUpRule {
    pub fn bonus_for(&self, amount: f64) -> f64 {
        if amount >= self.threshold {
            self.bonus
        } else {
            0.0
        }
    }

    /// Build the selection shown in the top-up sheet. Non-positive or
    /// non-finite amounts are not selectable.
    pub fn select(&self, amount: f64) -> Option<TopUpSelection> {
        if !amount.is_finite() || amount <= 0.0 {
            return None;
        }
        let bonus = self.bonus_for(amount);
        Some(TopUpSelection {
            amount,
            bonus,
            final_total: amount + bonus,
        })
    }
}

/// Bonus under the default rule
pub fn compute_top_up_bonus(amount: f64) -> f64 {
    TopUpRule::default().bonus_for(amount)
}

/// Amount picked in an open top-up sheet, with its derived bonus and total
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TopUpSelection {
    pub amount: f64,
    pub bonus: f64,
    pub final_total: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_is_a_step() {
        assert_eq!(compute_top_up_bonus(99.99), 0.0);
        assert_eq!(compute_top_up_bonus(100.0), 5.0);
        assert_eq!(compute_top_up_bonus(150.0), 5.0);
        assert_eq!(compute_top_up_bonus(10_000.0), 5.0);
    }

    #[test]
    fn test_selection_totals() {
        let rule = TopUpRule::default();
        let hundred = rule.select(100.0).expect("valid amount");
        assert_eq!(hundred.bonus, 5.0);
        assert_eq!(hundred.final_total, 105.0);

        let eighty = rule.select(80.0).expect("valid amount");
        assert_eq!(eighty.bonus, 0.0);
        assert_eq!(eighty.final_total, 80.0);
    }

    #[test]
    fn test_selection_rejects_bad_amounts() {
        let rule = TopUpRule::default();
        assert!(rule.select(0.0).is_none());
        assert!(rule.select(-5.0).is_none());
        assert!(rule.select(f64::NAN).is_none());
    }

    #[test]
    fn test_custom_rule() {
        let rule = TopUpRule { threshold: 50.0, bonus: 2.5 };
        assert_eq!(rule.bonus_for(49.0), 0.0);
        assert_eq!(rule.bonus_for(50.0), 2.5);
    }
}
