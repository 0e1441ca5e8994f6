//! Effect application.
//!
//! `apply` turns a validated effect into a new state value. It assumes
//! `validate` already passed: handlers clamp where the arithmetic demands
//! it but do not re-check preconditions. The input state is never touched.

use im::Vector;

use crate::core::config::{
    overheal_ceiling, MAX_STATUS_STACKS, NON_LETHAL_FLOOR, PERMANENT_DURATION,
};
use crate::core::{GameState, StatusEffect, Target};

use super::Effect;

/// Apply one effect, returning the new state.
///
/// Composites fold their children in order without validating them; use
/// the executor for anything that came from outside the kernel.
#[must_use]
pub fn apply(state: &GameState, effect: &Effect) -> GameState {
    let mut next = state.clone();
    apply_in_place(&mut next, effect);
    next
}

fn apply_in_place(state: &mut GameState, effect: &Effect) {
    match effect {
        Effect::Damage { target, amount, can_kill, .. } => {
            if let Some(vitals) = state.vitals(target) {
                let floor = if *can_kill { 0 } else { NON_LETHAL_FLOOR };
                let health = vitals.health.saturating_sub(*amount).max(floor);
                state.set_health(target, health);
            }
        }

        Effect::Heal { target, amount, can_overheal, .. } => {
            if let Some(vitals) = state.vitals(target) {
                let ceiling = if *can_overheal {
                    overheal_ceiling(vitals.max_health)
                } else {
                    vitals.max_health
                };
                let health = vitals.health.saturating_add(*amount).min(ceiling);
                state.set_health(target, health);
            }
        }

        Effect::ModifyCurrency { amount, .. } => {
            state.player.currency = state.player.currency.saturating_add(*amount).max(0);
        }

        Effect::ModifyExperience { amount, .. } => {
            state.player.experience = state.player.experience.saturating_add(*amount).max(0);
        }

        Effect::AddItem { item, .. } => {
            let mut item = item.clone();
            if item.id.is_none() {
                item.id = Some(state.alloc_item_id());
            }
            state.player.inventory.push_back(item);
        }

        Effect::RemoveItem { item_id, .. } => {
            state
                .player
                .inventory
                .retain(|item| item.id.as_ref() != Some(item_id));
        }

        Effect::ApplyStatus { target, status, .. } => apply_status(state, target, status),

        Effect::RemoveStatus { target, status_id, .. } => {
            if let Some(statuses) = state.statuses_mut(target) {
                statuses.retain(|s| s.id.as_ref() != Some(status_id));
            }
        }

        Effect::StartCombat { adversary, .. } => {
            state.adversary = Some(adversary.clone());
            state.in_combat = true;
        }

        Effect::EndCombat { .. } => {
            state.adversary = None;
            state.in_combat = false;
        }

        Effect::ChangeStance { stance, .. } => state.player.stance = *stance,

        Effect::Narrative { .. } => {}

        Effect::Composite { effects, .. } => {
            for child in effects {
                apply_in_place(state, child);
            }
        }
    }
}

fn apply_status(state: &mut GameState, target: &Target, incoming: &StatusEffect) {
    let existing = state
        .statuses(target)
        .and_then(|list| list.iter().position(|s| s.name == incoming.name));

    match existing {
        Some(index) => {
            if let Some(statuses) = state.statuses_mut(target) {
                let current = &mut statuses[index];
                current.duration = merge_duration(current.duration, incoming.duration);
                current.stacks = (current.stacks + 1).min(MAX_STATUS_STACKS);
                current.polarity = incoming.polarity;
                for (stat, delta) in incoming.modifiers.iter() {
                    current.modifiers.insert(stat.clone(), *delta);
                }
            }
        }
        None => {
            if !state.target_exists(target) {
                return;
            }
            let mut status = incoming.clone();
            if status.id.is_none() {
                status.id = Some(state.alloc_status_id());
            }
            status.stacks = 1;
            if let Some(statuses) = state.statuses_mut(target) {
                statuses.push_back(status);
            }
        }
    }
}

/// Refreshed duration: the longer of the two, with "until removed" winning.
fn merge_duration(old: i32, new: i32) -> i32 {
    if old == PERMANENT_DURATION || new == PERMANENT_DURATION {
        PERMANENT_DURATION
    } else {
        old.max(new)
    }
}

/// Advance every timed status effect by one turn.
///
/// Positive durations count down; an effect reaching zero is removed.
/// Effects lasting until removed are untouched.
#[must_use]
pub fn tick_statuses(state: &GameState) -> GameState {
    let mut next = state.clone();
    tick_list(&mut next.player.statuses);
    if let Some(adversary) = next.adversary.as_mut() {
        tick_list(&mut adversary.statuses);
    }
    let ids: Vec<_> = next.companions.keys().cloned().collect();
    for id in ids {
        if let Some(companion) = next.companions.get_mut(&id) {
            tick_list(&mut companion.statuses);
        }
    }
    next
}

fn tick_list(statuses: &mut Vector<StatusEffect>) {
    for status in statuses.iter_mut() {
        if status.duration > 0 {
            status.duration -= 1;
        }
    }
    statuses.retain(|s| s.duration != 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Adversary, Companion, CompanionId, Item, PlayerState, Polarity, Stance};
    use crate::effects::CombatResult;

    fn state() -> GameState {
        GameState::new(PlayerState::new(100).with_currency(50))
            .with_companion(Companion::new("mira", "Mira", 40))
    }

    #[test]
    fn test_damage_floors() {
        let s = state();

        let hit = apply(&s, &Effect::damage(Target::Player, 30));
        assert_eq!(hit.player.health, 70);

        let dead = apply(&s, &Effect::damage(Target::Player, 300));
        assert_eq!(dead.player.health, 0);

        let spared = apply(&s, &Effect::damage(Target::Player, 300).non_lethal());
        assert_eq!(spared.player.health, 1);
    }

    #[test]
    fn test_input_state_untouched() {
        let s = state();
        let _ = apply(&s, &Effect::damage(Target::Player, 30));
        assert_eq!(s.player.health, 100);
    }

    #[test]
    fn test_heal_ceilings() {
        let s = apply(&state(), &Effect::damage(Target::Player, 40));

        assert_eq!(apply(&s, &Effect::heal(Target::Player, 25)).player.health, 85);
        assert_eq!(apply(&s, &Effect::heal(Target::Player, 100)).player.health, 100);
        assert_eq!(apply(&s, &Effect::heal(Target::Player, 200).overheal()).player.health, 150);
    }

    #[test]
    fn test_plain_heal_settles_overheal_at_max() {
        let s = apply(&state(), &Effect::heal(Target::Player, 30).overheal());
        assert_eq!(s.player.health, 130);

        let s = apply(&s, &Effect::heal(Target::Player, 10));
        assert_eq!(s.player.health, 100);
    }

    #[test]
    fn test_companion_and_enemy_health() {
        let s = state().with_adversary(Adversary::new("wolf", "Wolf", 30));

        let s = apply(&s, &Effect::damage(Target::Enemy, 12));
        let s = apply(&s, &Effect::damage(Target::companion("mira"), 15));

        assert_eq!(s.adversary.as_ref().unwrap().health, 18);
        assert_eq!(s.companions[&CompanionId::from("mira")].health, 25);
    }

    #[test]
    fn test_currency_and_experience_clamp() {
        let s = apply(&state(), &Effect::currency(25));
        assert_eq!(s.player.currency, 75);

        let s = apply(&s, &Effect::experience(-10));
        assert_eq!(s.player.experience, 0);
    }

    #[test]
    fn test_inventory_add_assigns_ids() {
        let s = apply(&state(), &Effect::add_item(Item::new("Torch", "tool")));
        let s = apply(&s, &Effect::add_item(Item::new("Rope", "tool")));
        let s = apply(&s, &Effect::add_item(Item::new("Key", "key").with_id("key-1")));

        let ids: Vec<_> = s
            .player
            .inventory
            .iter()
            .map(|i| i.id.clone().unwrap().0)
            .collect();
        assert_eq!(ids, vec!["item-0", "item-1", "key-1"]);

        let s = apply(&s, &Effect::remove_item("item-0"));
        assert_eq!(s.player.inventory.len(), 2);
        assert!(s.player.item(&"item-0".into()).is_none());
    }

    #[test]
    fn test_status_stacking() {
        let s = apply(
            &state(),
            &Effect::apply_status(Target::Player, StatusEffect::new("poisoned", 2)),
        );
        let s = apply(
            &s,
            &Effect::apply_status(
                Target::Player,
                StatusEffect::new("poisoned", 5).with_polarity(Polarity::Debuff),
            ),
        );

        assert_eq!(s.player.statuses.len(), 1);
        let poisoned = &s.player.statuses[0];
        assert_eq!(poisoned.stacks, 2);
        assert_eq!(poisoned.duration, 5);
        assert_eq!(poisoned.polarity, Polarity::Debuff);
        assert_eq!(poisoned.id.as_ref().unwrap().as_str(), "status-0");
    }

    #[test]
    fn test_status_stack_cap() {
        let mut s = state();
        for _ in 0..(MAX_STATUS_STACKS + 5) {
            s = apply(&s, &Effect::apply_status(Target::Player, StatusEffect::new("rage", 3)));
        }
        assert_eq!(s.player.statuses[0].stacks, MAX_STATUS_STACKS);
    }

    #[test]
    fn test_first_application_starts_at_one_stack() {
        let mut incoming = StatusEffect::new("frenzy", 3);
        incoming.stacks = MAX_STATUS_STACKS;

        let s = apply(&state(), &Effect::apply_status(Target::Player, incoming.clone()));
        assert_eq!(s.player.statuses[0].stacks, 1);

        let s = apply(&s, &Effect::apply_status(Target::Player, incoming));
        assert_eq!(s.player.statuses[0].stacks, 2);
    }

    #[test]
    fn test_permanent_duration_wins() {
        assert_eq!(merge_duration(-1, 4), -1);
        assert_eq!(merge_duration(4, -1), -1);
        assert_eq!(merge_duration(2, 4), 4);
        assert_eq!(merge_duration(6, 4), 6);
    }

    #[test]
    fn test_status_remove_by_id() {
        let s = apply(
            &state(),
            &Effect::apply_status(Target::companion("mira"), StatusEffect::new("inspired", 3)),
        );
        let target = Target::companion("mira");
        assert_eq!(s.statuses(&target).unwrap().len(), 1);

        let s = apply(&s, &Effect::remove_status(target.clone(), "status-0"));
        assert!(s.statuses(&target).unwrap().is_empty());
    }

    #[test]
    fn test_combat_lifecycle() {
        let s = apply(&state(), &Effect::start_combat(Adversary::new("wolf", "Wolf", 30)));
        assert!(s.in_combat);
        assert!(s.adversary.is_some());

        let s = apply(&s, &Effect::end_combat(CombatResult::Victory));
        assert!(!s.in_combat);
        assert!(s.adversary.is_none());
    }

    #[test]
    fn test_stance_and_narrative() {
        let s = apply(&state(), &Effect::stance(Stance::Aggressive));
        assert_eq!(s.player.stance, Stance::Aggressive);

        let before = s.clone();
        let after = apply(&s, &Effect::narrative("Thunder rolls."));
        assert_eq!(before, after);
    }

    #[test]
    fn test_composite_folds_children() {
        let s = apply(
            &state(),
            &Effect::composite(
                "ambush",
                [Effect::damage(Target::Player, 10), Effect::currency(-20)],
            ),
        );
        assert_eq!(s.player.health, 90);
        assert_eq!(s.player.currency, 30);
    }

    #[test]
    fn test_tick_statuses() {
        let s = state();
        let s = apply(&s, &Effect::apply_status(Target::Player, StatusEffect::new("haste", 2)));
        let s = apply(&s, &Effect::apply_status(Target::Player, StatusEffect::new("cursed", -1)));
        let s = apply(
            &s,
            &Effect::apply_status(Target::companion("mira"), StatusEffect::new("shaken", 1)),
        );

        let s = tick_statuses(&s);
        assert_eq!(s.status_named(&Target::Player, "haste").unwrap().duration, 1);
        assert!(s.status_named(&Target::companion("mira"), "shaken").is_none());

        let s = tick_statuses(&s);
        assert!(s.status_named(&Target::Player, "haste").is_none());
        assert!(s.status_named(&Target::Player, "cursed").is_some());
    }
}
