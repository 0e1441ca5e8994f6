//! The built-in piece catalogue.
//!
//! Costs are in power-budget units. A cheap, common piece is worth 1-2;
//! a signature move 5 or more. Magnitudes here are the medium power
//! level; the resolver scales damage and heals for light and heavy turns.

use crate::core::{Adversary, Item, Polarity, Stance, StatusEffect, Target};
use crate::effects::{CombatResult, Effect};

use super::definition::{Piece, PieceCategory, Rarity};

/// Build every catalogue entry, in a stable order.
pub(crate) fn standard_pieces() -> Vec<Piece> {
    let mut pieces = Vec::new();
    pieces.extend(attacks());
    pieces.extend(enemy_actions());
    pieces.extend(defenses());
    pieces.extend(healing());
    pieces.extend(rewards());
    pieces.extend(hazards());
    pieces.extend(blessings());
    pieces.extend(encounters());
    pieces.extend(narrative());
    pieces
}

fn attacks() -> Vec<Piece> {
    vec![
        Piece::new("basic_strike", "Basic Strike", PieceCategory::Attack, 2)
            .with_tags(["melee", "physical"])
            .with_effect(Effect::damage(Target::Enemy, 6))
            .with_hint("A plain, honest blow."),
        Piece::new("heavy_blow", "Heavy Blow", PieceCategory::Attack, 3)
            .with_tags(["melee", "physical"])
            .with_effect(Effect::damage(Target::Enemy, 10))
            .with_hint("A slow, committed swing that lands hard."),
        Piece::new("precise_shot", "Precise Shot", PieceCategory::Attack, 4)
            .with_rarity(Rarity::Uncommon)
            .with_tags(["ranged", "physical"])
            .with_effect(Effect::damage(Target::Enemy, 9).ignoring_defense())
            .with_hint("An arrow finds the gap in the armor."),
        Piece::new("poison_dart", "Poison Dart", PieceCategory::Attack, 3)
            .with_rarity(Rarity::Uncommon)
            .with_tags(["ranged", "poison"])
            .with_effect(Effect::damage(Target::Enemy, 3))
            .with_effect(Effect::apply_status(
                Target::Enemy,
                StatusEffect::new("poisoned", 3)
                    .with_polarity(Polarity::Debuff)
                    .with_modifier("health_per_turn", -2),
            ))
            .with_hint("A needle, a sting, and a spreading numbness."),
        Piece::new("fireball", "Fireball", PieceCategory::Attack, 5)
            .with_rarity(Rarity::Rare)
            .with_tags(["magic", "fire", "ranged"])
            .with_effect(Effect::damage(Target::Enemy, 14))
            .with_effect(Effect::apply_status(
                Target::Enemy,
                StatusEffect::new("burning", 2)
                    .with_polarity(Polarity::Debuff)
                    .with_modifier("health_per_turn", -3),
            ))
            .with_hint("A roaring sphere of flame engulfs the foe."),
        Piece::new("reckless_flurry", "Reckless Flurry", PieceCategory::Attack, 4)
            .with_tags(["melee", "physical"])
            .with_effect(Effect::stance(Stance::Aggressive))
            .with_effect(Effect::damage(Target::Enemy, 5))
            .with_effect(Effect::damage(Target::Enemy, 5))
            .with_hint("Two wild swings, guard abandoned."),
        Piece::new("finishing_blow", "Finishing Blow", PieceCategory::Attack, 7)
            .with_rarity(Rarity::Legendary)
            .with_tags(["melee", "physical", "signature"])
            .with_effect(Effect::damage(Target::Enemy, 22).ignoring_defense())
            .with_hint("The strike the whole fight has been building toward."),
    ]
}

fn enemy_actions() -> Vec<Piece> {
    vec![
        Piece::new("enemy_claw", "Claw", PieceCategory::EnemyAction, 2)
            .with_tags(["melee", "physical"])
            .with_effect(Effect::damage(Target::Player, 5))
            .with_hint("Claws rake across the hero."),
        Piece::new("enemy_crushing_blow", "Crushing Blow", PieceCategory::EnemyAction, 4)
            .with_rarity(Rarity::Uncommon)
            .with_tags(["melee", "physical"])
            .with_effect(Effect::damage(Target::Player, 12).non_lethal())
            .with_hint("A blow that drives the hero to their knees."),
        Piece::new("enemy_venom", "Venomous Bite", PieceCategory::EnemyAction, 3)
            .with_tags(["melee", "poison"])
            .with_effect(Effect::damage(Target::Player, 3))
            .with_effect(Effect::apply_status(
                Target::Player,
                StatusEffect::new("poisoned", 3)
                    .with_polarity(Polarity::Debuff)
                    .with_modifier("health_per_turn", -2),
            ))
            .with_hint("Fangs sink in; the wound burns."),
        Piece::new("enemy_war_cry", "War Cry", PieceCategory::EnemyAction, 2)
            .with_tags(["fear"])
            .with_effect(Effect::apply_status(
                Target::Player,
                StatusEffect::new("shaken", 2)
                    .with_polarity(Polarity::Debuff)
                    .with_modifier("attack", -1),
            ))
            .with_hint("A bellow that rattles the hero's nerve."),
    ]
}

fn defenses() -> Vec<Piece> {
    vec![
        Piece::new("raise_guard", "Raise Guard", PieceCategory::Defense, 1)
            .with_tags(["stance"])
            .with_effect(Effect::stance(Stance::Defensive))
            .with_effect(Effect::apply_status(
                Target::Player,
                StatusEffect::new("guarded", 1)
                    .with_polarity(Polarity::Buff)
                    .with_modifier("defense", 2),
            ))
            .with_hint("Shield up, weight low."),
        Piece::new("evasive_step", "Evasive Step", PieceCategory::Defense, 2)
            .with_tags(["stance", "agility"])
            .with_effect(Effect::stance(Stance::Evasive))
            .with_effect(Effect::apply_status(
                Target::Player,
                StatusEffect::new("nimble", 2)
                    .with_polarity(Polarity::Buff)
                    .with_modifier("evasion", 3),
            ))
            .with_hint("Light on the feet, hard to pin down."),
        Piece::new("steady_breath", "Steady Breath", PieceCategory::Defense, 1)
            .with_tags(["stance"])
            .with_effect(Effect::stance(Stance::Balanced))
            .with_hint("A breath, a reset."),
    ]
}

fn healing() -> Vec<Piece> {
    vec![
        Piece::new("minor_heal", "Minor Heal", PieceCategory::Healing, 2)
            .with_tags(["restorative"])
            .with_effect(Effect::heal(Target::Player, 10))
            .with_hint("A small warmth knits a shallow cut."),
        Piece::new("second_wind", "Second Wind", PieceCategory::Healing, 3)
            .with_tags(["restorative", "stance"])
            .with_effect(Effect::heal(Target::Player, 15))
            .with_effect(Effect::stance(Stance::Balanced))
            .with_hint("Fresh resolve floods back."),
        Piece::new("major_heal", "Major Heal", PieceCategory::Healing, 4)
            .with_rarity(Rarity::Uncommon)
            .with_tags(["restorative", "magic"])
            .with_effect(Effect::heal(Target::Player, 25))
            .with_hint("Light pours into deep wounds."),
        Piece::new("overflowing_vitality", "Overflowing Vitality", PieceCategory::Healing, 5)
            .with_rarity(Rarity::Rare)
            .with_tags(["restorative", "magic"])
            .with_effect(Effect::heal(Target::Player, 30).overheal())
            .with_hint("More life than the body can hold."),
    ]
}

fn rewards() -> Vec<Piece> {
    vec![
        Piece::new("small_purse", "Small Purse", PieceCategory::Reward, 1)
            .with_tags(["gold"])
            .with_effect(Effect::currency(15))
            .with_hint("A few coins in a worn pouch."),
        Piece::new("treasure_cache", "Treasure Cache", PieceCategory::Reward, 4)
            .with_rarity(Rarity::Rare)
            .with_tags(["gold", "item"])
            .with_effect(Effect::currency(60))
            .with_effect(Effect::add_item(Item::new("Jeweled Goblet", "treasure")))
            .with_hint("A hidden stash, glittering."),
        Piece::new("insight", "Insight", PieceCategory::Reward, 2)
            .with_tags(["experience"])
            .with_effect(Effect::experience(25))
            .with_hint("Something clicks; a lesson learned."),
        Piece::new("mysterious_trinket", "Mysterious Trinket", PieceCategory::Reward, 2)
            .with_rarity(Rarity::Uncommon)
            .with_tags(["item"])
            .with_effect(Effect::add_item(Item::new("Mysterious Trinket", "curio")))
            .with_hint("An object that hums faintly."),
        Piece::new("healing_draught", "Healing Draught", PieceCategory::Reward, 2)
            .with_tags(["item", "restorative"])
            .with_effect(Effect::add_item(Item::new("Healing Draught", "consumable")))
            .with_hint("A corked vial of red liquid."),
    ]
}

fn hazards() -> Vec<Piece> {
    vec![
        Piece::new("spike_trap", "Spike Trap", PieceCategory::Hazard, 3)
            .with_tags(["trap", "physical"])
            .with_effect(Effect::damage(Target::Player, 8).non_lethal())
            .with_hint("The floor gives way to iron spikes."),
        Piece::new("gas_trap", "Gas Trap", PieceCategory::Hazard, 3)
            .with_tags(["trap", "poison"])
            .with_effect(Effect::damage(Target::Player, 4).non_lethal())
            .with_effect(Effect::apply_status(
                Target::Player,
                StatusEffect::new("nauseous", 2)
                    .with_polarity(Polarity::Debuff)
                    .with_modifier("attack", -1),
            ))
            .with_hint("A hiss, a sweet smell, a rolling stomach."),
        Piece::new("collapsing_floor", "Collapsing Floor", PieceCategory::Hazard, 5)
            .with_rarity(Rarity::Uncommon)
            .with_tags(["trap", "physical"])
            .with_effect(Effect::damage(Target::Player, 15).non_lethal())
            .with_hint("Stone cracks and the world drops away."),
        Piece::new("pickpocket", "Pickpocket", PieceCategory::Hazard, 2)
            .with_tags(["theft", "gold"])
            .with_effect(Effect::currency(-10))
            .with_hint("A brush in the crowd; a lighter purse."),
    ]
}

fn blessings() -> Vec<Piece> {
    vec![
        Piece::new("shrine_blessing", "Shrine Blessing", PieceCategory::Blessing, 3)
            .with_tags(["shrine", "divine"])
            .with_effect(Effect::apply_status(
                Target::Player,
                StatusEffect::new("blessed", 5)
                    .with_polarity(Polarity::Buff)
                    .with_modifier("attack", 2),
            ))
            .with_hint("A gentle presence settles on the hero's shoulders."),
        Piece::new("shrine_curse", "Shrine Curse", PieceCategory::Blessing, 3)
            .with_tags(["shrine", "divine", "curse"])
            .with_effect(Effect::apply_status(
                Target::Player,
                StatusEffect::new("cursed", 5)
                    .with_polarity(Polarity::Debuff)
                    .with_modifier("defense", -2),
            ))
            .with_hint("The idol's eyes follow; something cold takes hold."),
        Piece::new("cleansing_light", "Cleansing Light", PieceCategory::Blessing, 2)
            .with_tags(["shrine", "divine", "restorative"])
            .with_effect(Effect::heal(Target::Player, 8))
            .with_effect(Effect::narrative("Pale light washes over you."))
            .with_hint("Light that soothes rather than burns."),
        Piece::new("ancestral_ward", "Ancestral Ward", PieceCategory::Blessing, 6)
            .with_rarity(Rarity::Legendary)
            .with_tags(["shrine", "divine"])
            .with_effect(Effect::apply_status(
                Target::Player,
                StatusEffect::new("warded", -1)
                    .with_polarity(Polarity::Buff)
                    .with_modifier("defense", 3)
                    .with_modifier("attack", 1),
            ))
            .with_hint("The old ones stand watch, for good."),
    ]
}

fn encounters() -> Vec<Piece> {
    vec![
        Piece::new("bandit_ambush", "Bandit Ambush", PieceCategory::Encounter, 4)
            .with_tags(["combat_start", "humanoid"])
            .with_effect(Effect::start_combat(
                Adversary::new("bandit", "Bandit", 30)
                    .with_attr("attack", 4)
                    .with_attr("defense", 1),
            ))
            .with_effect(Effect::damage(Target::Player, 4))
            .with_hint("Figures spring from the brush, blades out."),
        Piece::new("prowling_wolf", "Prowling Wolf", PieceCategory::Encounter, 3)
            .with_tags(["combat_start", "beast"])
            .with_effect(Effect::start_combat(
                Adversary::new("wolf", "Grey Wolf", 24).with_attr("attack", 3),
            ))
            .with_hint("Yellow eyes in the treeline."),
        Piece::new("combat_victory", "Victory", PieceCategory::Encounter, 3)
            .with_tags(["combat_end"])
            .with_effect(Effect::end_combat(CombatResult::Victory))
            .with_effect(Effect::experience(40))
            .with_effect(Effect::currency(20))
            .with_hint("The foe falls; spoils and lessons remain."),
        Piece::new("combat_retreat", "Retreat", PieceCategory::Encounter, 1)
            .with_tags(["combat_end"])
            .with_effect(Effect::end_combat(CombatResult::Fled))
            .with_hint("Discretion, valor, and so on."),
        Piece::new("uneasy_truce", "Uneasy Truce", PieceCategory::Encounter, 2)
            .with_rarity(Rarity::Uncommon)
            .with_tags(["combat_end", "social"])
            .with_effect(Effect::end_combat(CombatResult::Truce))
            .with_effect(Effect::experience(15))
            .with_hint("Weapons lowered, not sheathed."),
    ]
}

fn narrative() -> Vec<Piece> {
    vec![
        Piece::new("ominous_omen", "Ominous Omen", PieceCategory::Narrative, 0)
            .with_tags(["flavor"])
            .with_effect(Effect::narrative("A crow watches, silent."))
            .with_hint("Foreshadowing without consequence."),
        Piece::new("quiet_moment", "Quiet Moment", PieceCategory::Narrative, 0)
            .with_tags(["flavor", "rest"])
            .with_effect(Effect::narrative("For a moment, nothing stirs."))
            .with_hint("A breath between beats."),
    ]
}
