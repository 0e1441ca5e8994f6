//! Tier resolvers.
//!
//! A generator says "a large reward" or "a minor curse"; these functions
//! turn that into integers from fixed tables. Only rewards roll, and they
//! roll from the caller's seeded `GameRng`.

mod blessing;
mod disposition;
mod reward;

pub use blessing::{blessing_status, resolve_blessing_tier, BlessingKind, BlessingOutcome, BlessingTier};
pub use disposition::{resolve_disposition_tier, DispositionDirection, DispositionTier};
pub use reward::{resolve_reward_tier, reward_effect, RewardKind, RewardTier};
