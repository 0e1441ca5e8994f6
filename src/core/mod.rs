//! Core kernel types: ids, targets, state, limits, RNG, errors.
//!
//! Everything here is plain data. The effect, piece, and tier modules
//! build their behavior on top of these types.

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod state;
pub mod target;

pub use error::KernelError;
pub use ids::{CompanionId, ItemId, StatusId};
pub use rng::{GameRng, GameRngState};
pub use state::{
    Adversary, Companion, GameState, Item, PlayerState, Polarity, Stance, StateDigest,
    StatusEffect, Vitals,
};
pub use target::Target;
