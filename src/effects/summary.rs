//! Human-readable one-line effect summaries.
//!
//! Used by preview and confirmation screens. Summaries describe the
//! instruction, not its outcome; pair them with validation results to show
//! whether it would apply.

use crate::core::config::PERMANENT_DURATION;

use super::Effect;

/// Describe an effect in one line.
///
/// ```
/// use rpg_kernel::core::Target;
/// use rpg_kernel::effects::{summarize, Effect};
///
/// assert_eq!(summarize(&Effect::damage(Target::Enemy, 6)), "Deal 6 damage to enemy");
/// assert_eq!(summarize(&Effect::currency(-10)), "Lose 10 gold");
/// ```
#[must_use]
pub fn summarize(effect: &Effect) -> String {
    match effect {
        Effect::Damage { target, amount, can_kill, ignore_defense, .. } => {
            let mut line = format!("Deal {amount} damage to {target}");
            if !can_kill {
                line.push_str(" (non-lethal)");
            }
            if *ignore_defense {
                line.push_str(" (ignores defense)");
            }
            line
        }
        Effect::Heal { target, amount, can_overheal, .. } => {
            let suffix = if *can_overheal { " (can overheal)" } else { "" };
            format!("Heal {target} for {amount}{suffix}")
        }
        Effect::ModifyCurrency { amount, .. } => signed("gold", *amount),
        Effect::ModifyExperience { amount, .. } => signed("experience", *amount),
        Effect::AddItem { item, .. } if item.quantity > 1 => {
            format!("Receive {} x{}", item.name, item.quantity)
        }
        Effect::AddItem { item, .. } => format!("Receive {}", item.name),
        Effect::RemoveItem { item_id, .. } => format!("Lose item {item_id}"),
        Effect::ApplyStatus { target, status, .. } => {
            if status.duration == PERMANENT_DURATION {
                format!("Apply {} to {target} until removed", status.name)
            } else {
                format!("Apply {} to {target} for {} turns", status.name, status.duration)
            }
        }
        Effect::RemoveStatus { target, status_id, .. } => {
            format!("Remove status {status_id} from {target}")
        }
        Effect::StartCombat { adversary, .. } => {
            format!("Begin combat with {} ({} HP)", adversary.name, adversary.health)
        }
        Effect::EndCombat { result, .. } => {
            format!("End combat ({})", format!("{result:?}").to_lowercase())
        }
        Effect::ChangeStance { stance, .. } => {
            format!("Take a {} stance", format!("{stance:?}").to_lowercase())
        }
        Effect::Narrative { text, .. } => format!("Narrate: {text}"),
        Effect::Composite { effects, description, .. } if description.is_empty() => {
            format!("{} combined effects", effects.len())
        }
        Effect::Composite { effects, description, .. } => {
            format!("{description} ({} effects)", effects.len())
        }
    }
}

/// Summaries for a list, one line per effect.
#[must_use]
pub fn summarize_all(effects: &[Effect]) -> Vec<String> {
    effects.iter().map(summarize).collect()
}

fn signed(noun: &str, amount: i64) -> String {
    if amount < 0 {
        format!("Lose {} {noun}", amount.unsigned_abs())
    } else {
        format!("Gain {amount} {noun}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Adversary, Item, Stance, StatusEffect, Target};
    use crate::effects::CombatResult;

    #[test]
    fn test_health_lines() {
        assert_eq!(
            summarize(&Effect::damage(Target::Player, 3).non_lethal()),
            "Deal 3 damage to player (non-lethal)"
        );
        assert_eq!(
            summarize(&Effect::heal(Target::companion("mira"), 8).overheal()),
            "Heal companion:mira for 8 (can overheal)"
        );
    }

    #[test]
    fn test_resource_lines() {
        assert_eq!(summarize(&Effect::currency(30)), "Gain 30 gold");
        assert_eq!(summarize(&Effect::experience(-5)), "Lose 5 experience");
        assert_eq!(
            summarize(&Effect::add_item(Item::new("Arrow", "ammo").with_quantity(12))),
            "Receive Arrow x12"
        );
        assert_eq!(summarize(&Effect::remove_item("key-1")), "Lose item key-1");
    }

    #[test]
    fn test_status_lines() {
        assert_eq!(
            summarize(&Effect::apply_status(Target::Enemy, StatusEffect::new("burning", 3))),
            "Apply burning to enemy for 3 turns"
        );
        assert_eq!(
            summarize(&Effect::apply_status(Target::Player, StatusEffect::new("cursed", -1))),
            "Apply cursed to player until removed"
        );
    }

    #[test]
    fn test_combat_and_misc_lines() {
        assert_eq!(
            summarize(&Effect::start_combat(Adversary::new("wolf", "Grey Wolf", 30))),
            "Begin combat with Grey Wolf (30 HP)"
        );
        assert_eq!(summarize(&Effect::end_combat(CombatResult::Fled)), "End combat (fled)");
        assert_eq!(summarize(&Effect::stance(Stance::Defensive)), "Take a defensive stance");
        assert_eq!(summarize(&Effect::narrative("Mist rises.")), "Narrate: Mist rises.");
        assert_eq!(
            summarize(&Effect::composite("Ambush", [Effect::currency(1), Effect::currency(2)])),
            "Ambush (2 effects)"
        );
    }

    #[test]
    fn test_summarize_all() {
        let lines = summarize_all(&[Effect::currency(1), Effect::experience(2)]);
        assert_eq!(lines, vec!["Gain 1 gold", "Gain 2 experience"]);
    }
}
