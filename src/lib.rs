//! # rpg-kernel
//!
//! The deterministic rules kernel of a narrated role-playing game.
//!
//! A generative text model writes the story and proposes what happens.
//! This crate decides whether each proposed happening is permitted and
//! applies it, so that no output, however malformed, can corrupt health,
//! currency, inventory, combat, or status stacking.
//!
//! ## Design Principles
//!
//! 1. **Closed instruction set**: `Effect` is a sum type; every handler is
//!    an exhaustive match and unknown instructions cannot be represented.
//!
//! 2. **Validate, then apply**: Each effect is checked against the state
//!    as it stands at that moment. Invalid effects are skipped and
//!    reported; they never abort the rest of the list.
//!
//! 3. **Immutable state**: `GameState` is built on `im` persistent
//!    collections. Every step yields a new value in O(1).
//!
//! 4. **Replayable**: The only randomness is in tier rolls, drawn from a
//!    seeded `GameRng` owned by the `Session`.
//!
//! ## Modules
//!
//! - `core`: Ids, state, targets, compiled-in limits, RNG, errors
//! - `effects`: Effect types, validator, applier, executor, summaries
//! - `pieces`: Costed effect bundles, registry, resolver, budgets
//! - `tiers`: Reward, blessing, and disposition tier tables
//! - `rules`: Decisions, the kernel entry point, sessions
//!
//! ## Example
//!
//! ```
//! use rpg_kernel::{execute, Effect, GameState, PlayerState, Target};
//!
//! let state = GameState::new(PlayerState::new(100).with_currency(50));
//! let report = execute(
//!     state,
//!     &[
//!         Effect::damage(Target::Player, 25),
//!         Effect::currency(-100),
//!         Effect::currency(30),
//!     ],
//! );
//!
//! assert_eq!(report.state.player.health, 75);
//! assert_eq!(report.state.player.currency, 80);
//! assert_eq!(report.skipped[0].reason.to_string(), "Insufficient gold");
//! ```

pub mod core;
pub mod effects;
pub mod pieces;
pub mod rules;
pub mod tiers;

// Re-export commonly used types
pub use crate::core::{
    Adversary, Companion, CompanionId, GameRng, GameRngState, GameState, Item, ItemId,
    KernelError, PlayerState, Polarity, Stance, StatusEffect, StatusId, Target,
};

pub use crate::effects::{
    apply, execute, summarize, tick_statuses, validate, validate_effects, CombatResult, Effect,
    EffectKind, ExecutionReport, Rejection,
};

pub use crate::pieces::{
    budget_for, resolve, BudgetContext, Piece, PieceCategory, PieceQuery, PieceRegistry,
    PowerLevel, Rarity, Resolution, ResolutionError,
};

pub use crate::tiers::{
    resolve_blessing_tier, resolve_disposition_tier, resolve_reward_tier, BlessingKind,
    BlessingTier, DispositionDirection, DispositionTier, RewardKind, RewardTier,
};

pub use crate::rules::{Decision, DecisionError, DecisionOutcome, Kernel, Session, SessionSnapshot};
