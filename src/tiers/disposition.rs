//! Disposition tiers: how much a companion's attitude moves.

use serde::{Deserialize, Serialize};

use crate::core::config::DISPOSITION_SHIFTS;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispositionTier {
    #[default]
    None,
    Small,
    Medium,
    Large,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispositionDirection {
    Warmer,
    Colder,
}

impl DispositionTier {
    pub const ALL: [DispositionTier; 4] = [
        DispositionTier::None,
        DispositionTier::Small,
        DispositionTier::Medium,
        DispositionTier::Large,
    ];
}

/// Signed disposition change for a tier and direction.
///
/// ```
/// use rpg_kernel::tiers::{resolve_disposition_tier, DispositionDirection, DispositionTier};
///
/// assert_eq!(resolve_disposition_tier(DispositionDirection::Colder, DispositionTier::None), 0);
/// assert!(resolve_disposition_tier(DispositionDirection::Colder, DispositionTier::Large) < 0);
/// ```
#[must_use]
pub fn resolve_disposition_tier(direction: DispositionDirection, tier: DispositionTier) -> i64 {
    let shift = match tier {
        DispositionTier::None => 0,
        DispositionTier::Small => DISPOSITION_SHIFTS[0],
        DispositionTier::Medium => DISPOSITION_SHIFTS[1],
        DispositionTier::Large => DISPOSITION_SHIFTS[2],
    };
    match direction {
        DispositionDirection::Warmer => shift,
        DispositionDirection::Colder => -shift,
    }
}
