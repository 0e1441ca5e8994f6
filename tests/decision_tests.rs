//! Decision decoding and kernel tests.
//!
//! These tests feed JSON the way a generator would produce it:
//! - Both decision shapes
//! - Loud failure on unknown instructions
//! - The piece path through budgets and power levels

use rpg_kernel::rules::TurnError;
use rpg_kernel::{
    Adversary, BudgetContext, Decision, DecisionError, GameState, Kernel, KernelError,
    PlayerState, ResolutionError,
};

fn fight() -> GameState {
    GameState::new(PlayerState::new(60).with_currency(10))
        .with_adversary(Adversary::new("troll", "Troll", 90))
}

/// Test a raw-effects decision from JSON through to a new state.
#[test]
fn test_effects_json_end_to_end() {
    let json = r#"{
        "narration": "The troll swings and you riposte.",
        "effects": [
            { "type": "damage", "target": "player", "amount": 12, "source": "troll" },
            { "type": "damage", "target": "enemy", "amount": 9 },
            { "type": "change_stance", "stance": "aggressive" },
            { "type": "narrative", "text": "Steel rings." }
        ]
    }"#;

    let outcome = Kernel::standard()
        .apply_json(&fight(), json, BudgetContext::Enemy, 0)
        .unwrap();

    assert_eq!(outcome.state().player.health, 48);
    assert_eq!(outcome.state().adversary.as_ref().unwrap().health, 81);
    assert_eq!(outcome.report.narrative, vec!["Steel rings."]);
    assert_eq!(outcome.narration, "The troll swings and you riposte.");
}

/// Test a composite decision with camelCase fields.
#[test]
fn test_composite_json() {
    let json = r#"{
        "narration": "",
        "effects": [{
            "type": "composite",
            "description": "Loot the den",
            "effects": [
                { "type": "modify_gold", "amount": 12 },
                { "type": "add_item", "item": { "name": "Fang", "kind": "trophy" } },
                { "type": "heal", "target": "player", "amount": 5, "canOverheal": true }
            ]
        }]
    }"#;

    let decision = Decision::from_json(json).unwrap();
    let outcome = Kernel::standard()
        .apply(&fight(), &decision, BudgetContext::Enemy, 0)
        .unwrap();

    assert_eq!(outcome.state().player.currency, 22);
    assert_eq!(outcome.state().player.inventory.len(), 1);
    assert_eq!(outcome.state().player.health, 65);
}

/// Test that one unknown effect rejects the whole decision.
#[test]
fn test_unknown_type_rejects_decision() {
    let json = r#"{ "effects": [
        { "type": "damage", "target": "enemy", "amount": 3 },
        { "type": "grant_wish" }
    ] }"#;

    match Decision::from_json(json) {
        Err(KernelError::UnknownEffectType(name)) => assert_eq!(name, "grant_wish"),
        other => panic!("expected unknown effect type, got {other:?}"),
    }
}

/// Test that a bad target selector is a decoding error, not a skip.
#[test]
fn test_bad_target_is_malformed() {
    let json = r#"{ "effects": [{ "type": "damage", "target": "the moon", "amount": 3 }] }"#;
    assert!(matches!(Decision::from_json(json), Err(KernelError::MalformedDecision(_))));
}

/// Test that a misspelled field rejects the decision instead of taking its default.
#[test]
fn test_misspelled_field_is_malformed() {
    let json = r#"{ "effects": [{ "type": "damage", "target": "player", "amount": 500, "canKil": false }] }"#;
    let err = Kernel::standard()
        .apply_json(&fight(), json, BudgetContext::Enemy, 0)
        .unwrap_err();

    match err {
        TurnError::Decode(KernelError::MalformedDecision(message)) => assert!(message.contains("canKil")),
        other => panic!("unexpected {other:?}"),
    }
}

/// Test the piece path with a heavy power level.
#[test]
fn test_piece_json_heavy() {
    let json = r#"{ "narration": "A mighty blow!", "pieceIds": ["heavy_blow"], "powerLevel": "heavy" }"#;
    let outcome = Kernel::standard()
        .apply_json(&fight(), json, BudgetContext::Enemy, 0)
        .unwrap();

    assert_eq!(outcome.state().adversary.as_ref().unwrap().health, 75);
    assert_eq!(outcome.total_cost, 3);
    assert_eq!(outcome.budget, Some(5));
}

/// Test the piece path reporting unknown ids.
#[test]
fn test_piece_json_unknown_id() {
    let json = r#"{ "pieceIds": ["basic_strike", "orbital_laser"] }"#;
    let err = Kernel::standard()
        .apply_json(&fight(), json, BudgetContext::Enemy, 0)
        .unwrap_err();

    match err {
        TurnError::Decision(DecisionError::Resolution(errors)) => {
            assert_eq!(errors, vec![ResolutionError::UnknownPiece("orbital_laser".into())]);
        }
        other => panic!("unexpected {other:?}"),
    }
}

/// Test that a decision whose every effect is refused is an error.
#[test]
fn test_nothing_applied() {
    let calm = GameState::new(PlayerState::new(60));
    let decision = Decision::pieces("Strike!", ["basic_strike"]);

    let err = Kernel::standard()
        .apply(&calm, &decision, BudgetContext::Enemy, 0)
        .unwrap_err();
    assert_eq!(err.to_string(), "action could not be completed");
}

/// Test that encounter pieces start and finish a fight.
#[test]
fn test_encounter_pieces() {
    let kernel = Kernel::standard();
    let calm = GameState::new(PlayerState::new(60));

    let start = kernel
        .apply(&calm, &Decision::pieces("", ["prowling_wolf"]), BudgetContext::Enemy, 0)
        .unwrap();
    assert!(start.state().in_combat);

    let end = kernel
        .apply(start.state(), &Decision::pieces("", ["combat_victory"]), BudgetContext::Enemy, 0)
        .unwrap();
    assert!(!end.state().in_combat);
    assert_eq!(end.state().player.experience, 40);
    assert_eq!(end.state().player.currency, 20);
}
