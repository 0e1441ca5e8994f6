//! Reward tiers: a coarse size in, a concrete amount out.

use serde::{Deserialize, Serialize};

use crate::core::config::{EXPERIENCE_REWARD_RANGES, GOLD_REWARD_RANGES};
use crate::core::GameRng;
use crate::effects::Effect;

/// How big a reward should feel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardTier {
    #[default]
    None,
    Small,
    Medium,
    Large,
}

/// What the reward is paid in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    Gold,
    Experience,
}

impl RewardTier {
    pub const ALL: [RewardTier; 4] = [
        RewardTier::None,
        RewardTier::Small,
        RewardTier::Medium,
        RewardTier::Large,
    ];

    /// Inclusive range for this tier, or `None` for the empty tier.
    #[must_use]
    pub fn range(self, kind: RewardKind) -> Option<(i64, i64)> {
        let table = match kind {
            RewardKind::Gold => &GOLD_REWARD_RANGES,
            RewardKind::Experience => &EXPERIENCE_REWARD_RANGES,
        };
        match self {
            RewardTier::None => None,
            RewardTier::Small => Some(table[0]),
            RewardTier::Medium => Some(table[1]),
            RewardTier::Large => Some(table[2]),
        }
    }
}

/// Roll a concrete reward amount.
///
/// ```
/// use rpg_kernel::core::GameRng;
/// use rpg_kernel::tiers::{resolve_reward_tier, RewardKind, RewardTier};
///
/// let mut rng = GameRng::new(1);
/// assert_eq!(resolve_reward_tier(RewardKind::Gold, RewardTier::None, &mut rng), 0);
///
/// let gold = resolve_reward_tier(RewardKind::Gold, RewardTier::Large, &mut rng);
/// assert!((50..=100).contains(&gold));
/// ```
pub fn resolve_reward_tier(kind: RewardKind, tier: RewardTier, rng: &mut GameRng) -> i64 {
    match tier.range(kind) {
        Some((min, max)) => rng.roll(min, max),
        None => 0,
    }
}

/// Roll a reward and wrap it as an effect. The empty tier yields nothing.
pub fn reward_effect(kind: RewardKind, tier: RewardTier, rng: &mut GameRng) -> Option<Effect> {
    let amount = resolve_reward_tier(kind, tier, rng);
    if amount == 0 {
        return None;
    }
    let effect = match kind {
        RewardKind::Gold => Effect::currency(amount),
        RewardKind::Experience => Effect::experience(amount),
    };
    Some(effect.from_source("reward"))
}
