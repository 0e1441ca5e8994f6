//! Blessing and curse tiers.
//!
//! Unlike rewards these are fixed: a major blessing is always the same
//! size, so the generator can promise it in narration without a roll.

use serde::{Deserialize, Serialize};

use crate::core::config::BLESSING_TABLE;
use crate::core::{Polarity, StatusEffect};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlessingTier {
    Minor,
    #[default]
    Standard,
    Major,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlessingKind {
    Blessing,
    Curse,
}

/// Resolved blessing numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlessingOutcome {
    /// Signed stat modifier. Negative for curses.
    pub magnitude: i64,
    /// Turns the status lasts.
    pub duration: i32,
}

impl BlessingTier {
    pub const ALL: [BlessingTier; 3] = [BlessingTier::Minor, BlessingTier::Standard, BlessingTier::Major];

    fn row(self) -> (i64, i32) {
        match self {
            BlessingTier::Minor => BLESSING_TABLE[0],
            BlessingTier::Standard => BLESSING_TABLE[1],
            BlessingTier::Major => BLESSING_TABLE[2],
        }
    }
}

/// Look up a blessing's magnitude and duration.
///
/// ```
/// use rpg_kernel::tiers::{resolve_blessing_tier, BlessingKind, BlessingTier};
///
/// let curse = resolve_blessing_tier(BlessingKind::Curse, BlessingTier::Major);
/// assert!(curse.magnitude < 0);
/// ```
#[must_use]
pub fn resolve_blessing_tier(kind: BlessingKind, tier: BlessingTier) -> BlessingOutcome {
    let (magnitude, duration) = tier.row();
    let magnitude = match kind {
        BlessingKind::Blessing => magnitude,
        BlessingKind::Curse => -magnitude,
    };
    BlessingOutcome { magnitude, duration }
}

/// Build the status a blessing or curse leaves on its target.
///
/// The modifier applies to `stat`; the status name is the stacking key,
/// so repeated blessings of the same name refresh rather than duplicate.
#[must_use]
pub fn blessing_status(
    name: impl Into<String>,
    stat: impl Into<String>,
    kind: BlessingKind,
    tier: BlessingTier,
) -> StatusEffect {
    let outcome = resolve_blessing_tier(kind, tier);
    let polarity = match kind {
        BlessingKind::Blessing => Polarity::Buff,
        BlessingKind::Curse => Polarity::Debuff,
    };
    StatusEffect::new(name, outcome.duration)
        .with_polarity(polarity)
        .with_modifier(stat, outcome.magnitude)
}
