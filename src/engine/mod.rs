//! Tier & credit engine
//!
//! Pure functions over monetary inputs. Nothing here touches the store; callers
//! sanitize amounts before handing them in.

pub mod card;
pub mod level;
pub mod topup;

pub use card::{compute_card_network, CardNetwork};
pub use level::{
    default_catalog, get_level_progress, get_next_level, get_traveler_level, level_standing,
    CatalogError, LevelCatalog, LevelStanding, TravelerLevel,
};
pub use topup::{compute_top_up_bonus, TopUpRule, TopUpSelection};
