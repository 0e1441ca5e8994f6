//! Compiled-in safety limits.
//!
//! Every cap the validator enforces lives here. They are constants rather
//! than runtime settings so that the limits in force can be read off the
//! source and cannot drift between deployments.

/// Largest damage a single effect may deal.
pub const MAX_DAMAGE: i64 = 500;

/// Largest heal a single effect may grant.
pub const MAX_HEAL: i64 = 500;

/// Largest absolute currency change a single effect may make.
pub const MAX_CURRENCY_CHANGE: i64 = 10_000;

/// Largest absolute experience change a single effect may make.
pub const MAX_EXPERIENCE_CHANGE: i64 = 100_000;

/// Largest max health an adversary installed by an effect may have.
pub const MAX_ACTOR_HEALTH: i64 = 100_000;

/// Inventory ceiling. Adds are rejected once the player holds this many items.
pub const MAX_INVENTORY_SIZE: usize = 50;

/// Stack count at which re-applying a status stops adding stacks.
pub const MAX_STATUS_STACKS: u32 = 10;

/// Most stat modifiers a single status effect may carry.
pub const MAX_STATUS_MODIFIERS: usize = 8;

/// Deepest allowed nesting of composite effects.
pub const MAX_COMPOSITE_DEPTH: usize = 8;

/// Overheal ceiling as a ratio of max health, expressed as `num / den`.
pub const OVERHEAL_RATIO: (i64, i64) = (3, 2);

/// Duration value meaning "until removed".
pub const PERMANENT_DURATION: i32 = -1;

/// Health floor for damage that is not allowed to kill.
pub const NON_LETHAL_FLOOR: i64 = 1;

/// Scaling applied to damage and heal amounts on a light turn.
pub const LIGHT_POWER_MULTIPLIER: f64 = 0.6;

/// Scaling applied to damage and heal amounts on a heavy turn.
pub const HEAVY_POWER_MULTIPLIER: f64 = 1.5;

/// Piece budget sizing as `(base, per_depth, cap)`.
pub const ENEMY_BUDGET: (u32, u32, u32) = (5, 1, 12);
pub const BOSS_BUDGET: (u32, u32, u32) = (8, 2, 20);
pub const TRAP_BUDGET: (u32, u32, u32) = (3, 1, 8);
pub const SHRINE_BUDGET: (u32, u32, u32) = (4, 1, 10);

/// Inclusive gold reward ranges for the small, medium and large tiers.
pub const GOLD_REWARD_RANGES: [(i64, i64); 3] = [(5, 15), (20, 40), (50, 100)];

/// Inclusive experience reward ranges for the small, medium and large tiers.
pub const EXPERIENCE_REWARD_RANGES: [(i64, i64); 3] = [(10, 25), (30, 60), (75, 150)];

/// Blessing `(magnitude, duration)` for the minor, standard and major tiers.
/// Curses use the same table with the magnitude negated.
pub const BLESSING_TABLE: [(i64, i32); 3] = [(1, 3), (2, 5), (3, 8)];

/// Disposition shift for the small, medium and large tiers.
pub const DISPOSITION_SHIFTS: [i64; 3] = [5, 10, 20];

/// Companion disposition is kept within `-DISPOSITION_LIMIT..=DISPOSITION_LIMIT`.
pub const DISPOSITION_LIMIT: i64 = 100;

/// Overheal ceiling for an actor with the given max health.
///
/// ```
/// use rpg_kernel::core::config::overheal_ceiling;
///
/// assert_eq!(overheal_ceiling(100), 150);
/// assert_eq!(overheal_ceiling(15), 22);
/// ```
#[must_use]
pub const fn overheal_ceiling(max_health: i64) -> i64 {
    max_health.saturating_mul(OVERHEAL_RATIO.0) / OVERHEAL_RATIO.1
}
