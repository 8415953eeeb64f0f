//! Traveler levels
//!
//! Maps cumulative spend to a tier badge, the tier after it, and how far the
//! traveler has progressed between the two floors.

use lazy_static::lazy_static;
use serde::Serialize;
use thiserror::Error;

/// One bracket of cumulative spend in the level catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelerLevel {
    pub key: String,
    pub name: String,
    pub emoji: String,
    pub color: String,
    /// Inclusive floor
    pub min_spent: f64,
    /// Exclusive ceiling, equal to the next floor. `None` for the top tier
    pub max_spent: Option<f64>,
    pub description: String,
    pub benefits: Vec<String>,
}

impl TravelerLevel {
    #[allow(clippy::too_many_arguments)]
    fn new(
        key: &str,
        name: &str,
        emoji: &str,
        color: &str,
        min_spent: f64,
        max_spent: Option<f64>,
        description: &str,
        benefits: &[&str],
    ) -> Self {
        TravelerLevel {
            key: key.to_string(),
            name: name.to_string(),
            emoji: emoji.to_string(),
            color: color.to_string(),
            min_spent,
            max_spent,
            description: description.to_string(),
            benefits: benefits.iter().map(|b| b.to_string()).collect(),
        }
    }

    /// Badge text shown next to a profile, e.g. "🧭 Explorer"
    pub fn badge(&self) -> String {
        format!("{} {}", self.emoji, self.name)
    }

    pub fn contains(&self, total_spent: f64) -> bool {
        total_spent >= self.min_spent && self.max_spent.map_or(true, |max| total_spent < max)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Level catalog is empty")]
    Empty,
    #[error("Lowest level must start at 0, but '{0}' starts at {1}")]
    FloorNotZero(String, f64),
    #[error("Level '{0}' does not start above the level before it")]
    NotIncreasing(String),
    #[error("Level '{0}' overlaps the level after it")]
    Overlap(String),
    #[error("Level '{0}' ends before the level after it starts")]
    Gap(String),
    #[error("Only the last level may be unbounded, but '{0}' is")]
    UnboundedBeforeLast(String),
    #[error("The last level '{0}' must be unbounded")]
    BoundedLast(String),
    #[error("Duplicate level key '{0}'")]
    DuplicateKey(String),
}

/// Immutable, ordered set of levels. Floors are strictly increasing and the
/// first one is 0, so every non-negative spend lands in exactly one level.
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<TravelerLevel>,
}

impl LevelCatalog {
    /// Build a catalog, rejecting anything that would break lookup or progress math
    pub fn new(mut levels: Vec<TravelerLevel>) -> Result<Self, CatalogError> {
        levels.sort_by(|a, b| a.min_spent.total_cmp(&b.min_spent));

        let first = levels.first().ok_or(CatalogError::Empty)?;
        if first.min_spent != 0.0 {
            return Err(CatalogError::FloorNotZero(first.key.clone(), first.min_spent));
        }

        for (i, pair) in levels.windows(2).enumerate() {
            let (current, next) = (&pair[0], &pair[1]);
            if next.min_spent <= current.min_spent {
                return Err(CatalogError::NotIncreasing(next.key.clone()));
            }
            match current.max_spent {
                None => return Err(CatalogError::UnboundedBeforeLast(current.key.clone())),
                Some(max) if max > next.min_spent => {
                    return Err(CatalogError::Overlap(current.key.clone()))
                }
                Some(max) if max < next.min_spent => {
                    return Err(CatalogError::Gap(current.key.clone()))
                }
                Some(_) => {}
            }
            if levels[i + 1..].iter().any(|l| l.key == current.key) {
                return Err(CatalogError::DuplicateKey(current.key.clone()));
            }
        }

        if let Some(last) = levels.last().filter(|l| l.max_spent.is_some()) {
            return Err(CatalogError::BoundedLast(last.key.clone()));
        }

        Ok(LevelCatalog { levels })
    }

    pub fn levels(&self) -> &[TravelerLevel] {
        &self.levels
    }

    /// Highest level whose floor the spend has reached.
    /// Negative or NaN spend falls back to the lowest level.
    pub fn get_traveler_level(&self, total_spent: f64) -> &TravelerLevel {
        self.levels
            .iter()
            .rev()
            .find(|level| level.min_spent <= total_spent)
            .unwrap_or(&self.levels[0])
    }

    /// Level right after `current_key` in catalog order. Unknown keys and the
    /// top level both yield `None`, which callers read as "already at max".
    pub fn get_next_level(&self, current_key: &str) -> Option<&TravelerLevel> {
        let index = self.levels.iter().position(|l| l.key == current_key)?;
        self.levels.get(index + 1)
    }

    pub fn get_level(&self, key: &str) -> Option<&TravelerLevel> {
        self.levels.iter().find(|l| l.key == key)
    }
}

lazy_static! {
    static ref DEFAULT_CATALOG: LevelCatalog = LevelCatalog::new(vec![
        TravelerLevel::new(
            "traveler", "Traveler", "🧳", "gray", 0.0, Some(50.0),
            "Just getting started",
            &["Access to every destination", "Standard support"],
        ),
        TravelerLevel::new(
            "explorer", "Explorer", "🧭", "blue", 50.0, Some(200.0),
            "You know your way around roaming",
            &["2% back as credit", "Priority email support"],
        ),
        TravelerLevel::new(
            "expert", "Expert Traveler", "✈️", "purple", 200.0, Some(500.0),
            "Seasoned on every continent",
            &["5% back as credit", "Priority chat support", "Early access to new destinations"],
        ),
        TravelerLevel::new(
            "globetrotter", "Globetrotter", "🌍", "gold", 500.0, None,
            "The world is your home network",
            &["10% back as credit", "Dedicated 24/7 support", "Free birthday data pack"],
        ),
    ])
    .expect("built-in level catalog is contiguous");
}

pub fn default_catalog() -> &'static LevelCatalog {
    &DEFAULT_CATALOG
}

pub fn get_traveler_level(total_spent: f64) -> &'static TravelerLevel {
    DEFAULT_CATALOG.get_traveler_level(total_spent)
}

pub fn get_next_level(current_key: &str) -> Option<&'static TravelerLevel> {
    DEFAULT_CATALOG.get_next_level(current_key)
}

/// Percentage of the way from the current floor to the next floor, always in [0, 100]
pub fn get_level_progress(
    total_spent: f64,
    current_level: &TravelerLevel,
    next_level: Option<&TravelerLevel>,
) -> f64 {
    let next = match next_level {
        Some(next) => next,
        None => return 100.0,
    };

    let span = next.min_spent - current_level.min_spent;
    if span <= 0.0 {
        return 100.0;
    }

    let progress = (total_spent - current_level.min_spent) / span * 100.0;
    if progress.is_nan() {
        return 0.0;
    }
    progress.clamp(0.0, 100.0)
}

/// Everything a profile screen needs to draw the tier card
#[derive(Debug, Clone, Serialize)]
pub struct LevelStanding {
    pub current: TravelerLevel,
    pub next: Option<TravelerLevel>,
    pub progress: f64,
    /// Spend still needed to reach the next floor
    pub remaining: Option<f64>,
}

pub fn level_standing(catalog: &LevelCatalog, total_spent: f64) -> LevelStanding {
    let current = catalog.get_traveler_level(total_spent);
    let next = catalog.get_next_level(&current.key);
    let progress = get_level_progress(total_spent, current, next);

    LevelStanding {
        current: current.clone(),
        next: next.cloned(),
        progress,
        remaining: next.map(|n| (n.min_spent - total_spent).max(0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_spend_maps_to_one_containing_level() {
        let catalog = default_catalog();
        for cents in (0..80_000).step_by(37) {
            let spent = cents as f64 / 100.0;
            let level = catalog.get_traveler_level(spent);
            assert!(level.contains(spent), "{} not inside {}", spent, level.key);
            let matches = catalog.levels().iter().filter(|l| l.contains(spent)).count();
            assert_eq!(matches, 1);
        }
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(get_traveler_level(0.0).key, "traveler");
        assert_eq!(get_traveler_level(49.99).key, "traveler");
        assert_eq!(get_traveler_level(49.995).key, "traveler");
        assert_eq!(get_traveler_level(199.999).key, "explorer");
        assert_eq!(get_traveler_level(50.0).key, "explorer");
        assert_eq!(get_traveler_level(200.0).key, "expert");
        assert_eq!(get_traveler_level(10_000.0).key, "globetrotter");
    }

    #[test]
    fn test_negative_and_nan_fall_back_to_lowest() {
        assert_eq!(get_traveler_level(-20.0).key, "traveler");
        assert_eq!(get_traveler_level(f64::NAN).key, "traveler");
    }

    #[test]
    fn test_next_level_floor_is_higher() {
        let catalog = default_catalog();
        let levels = catalog.levels();
        for level in &levels[..levels.len() - 1] {
            let next = catalog.get_next_level(&level.key).expect("next level");
            assert!(next.min_spent > level.min_spent);
        }
        assert!(catalog.get_next_level("globetrotter").is_none());
        assert!(catalog.get_next_level("astronaut").is_none());
    }

    #[test]
    fn test_progress_is_clamped_and_monotonic() {
        let current = get_traveler_level(60.0);
        let next = get_next_level(&current.key);

        let mut last = 0.0;
        for step in 0..=150 {
            let spent = 50.0 + step as f64;
            let progress = get_level_progress(spent, current, next);
            assert!((0.0..=100.0).contains(&progress));
            assert!(progress >= last);
            last = progress;
        }

        // stale spend from before the tier change
        assert_eq!(get_level_progress(10.0, current, next), 0.0);
        assert_eq!(get_level_progress(900.0, current, next), 100.0);
    }

    #[test]
    fn test_progress_without_next_level_is_full() {
        let top = get_traveler_level(750.0);
        assert_eq!(get_level_progress(750.0, top, None), 100.0);
        assert_eq!(get_level_progress(0.0, top, None), 100.0);
    }

    #[test]
    fn test_purchase_moves_traveler_to_explorer() {
        let before = level_standing(default_catalog(), 0.0);
        assert_eq!(before.current.name, "Traveler");
        assert_eq!(before.progress, 0.0);
        let next = before.next.expect("explorer after traveler");
        assert_eq!(next.name, "Explorer");
        assert_eq!(next.min_spent, 50.0);

        let after = level_standing(default_catalog(), 50.0);
        assert_eq!(after.current.name, "Explorer");
        assert_eq!(after.progress, 0.0);
        let next = after.next.expect("expert after explorer");
        assert_eq!(next.name, "Expert Traveler");
        assert_eq!(next.min_spent, 200.0);
    }

    #[test]
    fn test_catalog_rejects_overlapping_levels() {
        let levels = vec![
            TravelerLevel::new("a", "A", "", "", 0.0, Some(60.0), "", &[]),
            TravelerLevel::new("b", "B", "", "", 50.0, None, "", &[]),
        ];
        assert_eq!(LevelCatalog::new(levels).unwrap_err(), CatalogError::Overlap("a".into()));
    }

    #[test]
    fn test_catalog_rejects_equal_floors_and_missing_zero() {
        let equal = vec![
            TravelerLevel::new("a", "A", "", "", 0.0, Some(0.0), "", &[]),
            TravelerLevel::new("b", "B", "", "", 0.0, None, "", &[]),
        ];
        assert!(matches!(LevelCatalog::new(equal), Err(CatalogError::NotIncreasing(_))));

        let no_zero = vec![TravelerLevel::new("a", "A", "", "", 10.0, None, "", &[])];
        assert!(matches!(LevelCatalog::new(no_zero), Err(CatalogError::FloorNotZero(_, _))));
        assert_eq!(LevelCatalog::new(vec![]).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn test_catalog_sorts_input() {
        let levels = vec![
            TravelerLevel::new("b", "B", "", "", 100.0, None, "", &[]),
            TravelerLevel::new("a", "A", "", "", 0.0, Some(100.0), "", &[]),
        ];
        let catalog = LevelCatalog::new(levels).expect("valid catalog");
        assert_eq!(catalog.levels()[0].key, "a");
        assert_eq!(catalog.get_next_level("a").map(|l| l.key.as_str()), Some("b"));
    }

    #[test]
    fn test_fractional_spend_below_a_floor_still_has_a_level() {
        let catalog = default_catalog();
        for spent in [49.995, 49.999_999, 199.999, 499.9999, 500.0, 0.001] {
            let level = catalog.get_traveler_level(spent);
            assert!(level.contains(spent), "{} not inside {}", spent, level.key);
            let matches = catalog.levels().iter().filter(|l| l.contains(spent)).count();
            assert_eq!(matches, 1, "{} matched {} levels", spent, matches);
        }
    }

    #[test]
    fn test_built_in_catalog_validates() {
        let rebuilt = LevelCatalog::new(default_catalog().levels().to_vec()).expect("valid");
        assert_eq!(rebuilt.levels().len(), 4);
    }

    #[test]
    fn test_catalog_rejects_gaps_and_bounded_top() {
        let gapped = vec![
            TravelerLevel::new("a", "A", "", "", 0.0, Some(10.0), "", &[]),
            TravelerLevel::new("b", "B", "", "", 100.0, None, "", &[]),
        ];
        assert_eq!(LevelCatalog::new(gapped).unwrap_err(), CatalogError::Gap("a".into()));

        let bounded = vec![
            TravelerLevel::new("a", "A", "", "", 0.0, Some(10.0), "", &[]),
            TravelerLevel::new("b", "B", "", "", 10.0, Some(20.0), "", &[]),
        ];
        assert_eq!(
            LevelCatalog::new(bounded).unwrap_err(),
            CatalogError::BoundedLast("b".into())
        );
    }
}
