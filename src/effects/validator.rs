//! Effect validation.
//!
//! `validate` checks one effect against the current state and the
//! compiled-in limits. It never mutates and never panics: a failed check
//! is a [`Rejection`], which the executor records as a skipped effect.

use thiserror::Error;

use crate::core::config::{
    MAX_ACTOR_HEALTH, MAX_COMPOSITE_DEPTH, MAX_CURRENCY_CHANGE, MAX_DAMAGE, MAX_EXPERIENCE_CHANGE,
    MAX_HEAL, MAX_INVENTORY_SIZE, MAX_STATUS_MODIFIERS, PERMANENT_DURATION,
};
use crate::core::{GameState, ItemId, Target};

use super::Effect;

/// Why an effect was not applied.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Amount must be positive (got {0})")]
    NonPositiveAmount(i64),

    #[error("Amount {amount} exceeds cap of {cap}")]
    ExceedsCap { amount: i64, cap: i64 },

    #[error("No active enemy")]
    NoActiveEnemy,

    #[error("Unknown companion: {0}")]
    UnknownCompanion(String),

    #[error("Insufficient gold")]
    InsufficientGold,

    #[error("Inventory full")]
    InventoryFull,

    #[error("Duplicate item id: {0}")]
    DuplicateItem(ItemId),

    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("No active combat")]
    NoActiveCombat,

    #[error("Combat already in progress")]
    CombatInProgress,

    #[error("Invalid adversary: {0}")]
    InvalidAdversary(&'static str),

    #[error("Invalid status duration: {0}")]
    InvalidDuration(i32),

    #[error("Too many status modifiers ({0})")]
    TooManyModifiers(usize),

    #[error("Composite nesting exceeds depth {0}")]
    CompositeTooDeep(usize),
}

/// Validate a top-level effect.
///
/// Composites are checked only for nesting depth; their children are
/// validated one by one as the executor reaches them.
pub fn validate(state: &GameState, effect: &Effect) -> Result<(), Rejection> {
    validate_at_depth(state, effect, 0)
}

/// Validate an effect found `depth` composites deep.
pub(crate) fn validate_at_depth(
    state: &GameState,
    effect: &Effect,
    depth: usize,
) -> Result<(), Rejection> {
    match effect {
        Effect::Damage { target, amount, .. } => {
            check_amount(*amount, MAX_DAMAGE)?;
            check_target(state, target)
        }

        Effect::Heal { target, amount, .. } => {
            check_amount(*amount, MAX_HEAL)?;
            check_target(state, target)
        }

        Effect::ModifyCurrency { amount, .. } => {
            check_abs(*amount, MAX_CURRENCY_CHANGE)?;
            if *amount < 0 && state.player.currency.saturating_add(*amount) < 0 {
                return Err(Rejection::InsufficientGold);
            }
            Ok(())
        }

        Effect::ModifyExperience { amount, .. } => check_abs(*amount, MAX_EXPERIENCE_CHANGE),

        Effect::AddItem { item, .. } => {
            if state.player.inventory.len() >= MAX_INVENTORY_SIZE {
                return Err(Rejection::InventoryFull);
            }
            match &item.id {
                Some(id) if state.player.item(id).is_some() => {
                    Err(Rejection::DuplicateItem(id.clone()))
                }
                _ => Ok(()),
            }
        }

        Effect::RemoveItem { item_id, .. } => {
            if state.player.item(item_id).is_none() {
                return Err(Rejection::ItemNotFound(item_id.clone()));
            }
            Ok(())
        }

        Effect::ApplyStatus { target, status, .. } => {
            check_target(state, target)?;
            if status.duration < PERMANENT_DURATION {
                return Err(Rejection::InvalidDuration(status.duration));
            }
            if status.modifiers.len() > MAX_STATUS_MODIFIERS {
                return Err(Rejection::TooManyModifiers(status.modifiers.len()));
            }
            Ok(())
        }

        Effect::RemoveStatus { target, .. } => check_target(state, target),

        Effect::StartCombat { adversary, .. } => {
            if state.in_combat {
                return Err(Rejection::CombatInProgress);
            }
            if adversary.max_health <= 0 {
                return Err(Rejection::InvalidAdversary("max health must be positive"));
            }
            if adversary.max_health > MAX_ACTOR_HEALTH {
                return Err(Rejection::InvalidAdversary("max health exceeds cap"));
            }
            if adversary.health <= 0 || adversary.health > adversary.max_health {
                return Err(Rejection::InvalidAdversary("health out of range"));
            }
            Ok(())
        }

        Effect::EndCombat { .. } => {
            if !state.in_combat {
                return Err(Rejection::NoActiveCombat);
            }
            Ok(())
        }

        Effect::ChangeStance { .. } | Effect::Narrative { .. } => Ok(()),

        Effect::Composite { .. } => {
            if depth >= MAX_COMPOSITE_DEPTH {
                return Err(Rejection::CompositeTooDeep(MAX_COMPOSITE_DEPTH));
            }
            Ok(())
        }
    }
}

fn check_amount(amount: i64, cap: i64) -> Result<(), Rejection> {
    if amount <= 0 {
        return Err(Rejection::NonPositiveAmount(amount));
    }
    if amount > cap {
        return Err(Rejection::ExceedsCap { amount, cap });
    }
    Ok(())
}

fn check_abs(amount: i64, cap: i64) -> Result<(), Rejection> {
    if amount.unsigned_abs() > cap.unsigned_abs() {
        return Err(Rejection::ExceedsCap { amount, cap });
    }
    Ok(())
}

fn check_target(state: &GameState, target: &Target) -> Result<(), Rejection> {
    match target {
        Target::Player => Ok(()),
        Target::Enemy if state.has_active_enemy() => Ok(()),
        Target::Enemy => Err(Rejection::NoActiveEnemy),
        Target::Companion(id) if state.companions.contains_key(id) => Ok(()),
        Target::Companion(id) => Err(Rejection::UnknownCompanion(id.to_string())),
    }
}
