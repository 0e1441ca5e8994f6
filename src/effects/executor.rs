//! Effect execution - the single entry point for state mutation.
//!
//! The executor walks an effect list in order, validating each effect
//! against the state as it stands at that moment, applying it when valid
//! and recording a skip when not. A skip never stops the run: one bad
//! instruction cannot cancel the valid ones around it.
//!
//! Composites are flattened depth-first through the same path, so an
//! effect wrapped in a composite is treated exactly like a top-level one.

use tracing::{debug, warn};

use crate::core::GameState;

use super::report::{ExecutionReport, LogEntry, LogOutcome, SkippedEffect};
use super::summary::summarize;
use super::validator::validate_at_depth;
use super::{apply, Effect, Rejection};

/// Run an effect list against a state.
///
/// Takes the state by value: the caller hands it over and receives the
/// successor in the report.
pub fn execute(state: GameState, effects: &[Effect]) -> ExecutionReport {
    let mut run = Run::new(state);
    for effect in effects {
        run.step(effect, 0);
    }

    debug!(
        applied = run.report.applied.len(),
        skipped = run.report.skipped.len(),
        "effect list executed"
    );
    run.report
}

/// Run an effect list and keep only the final state.
pub fn execute_state(state: GameState, effects: &[Effect]) -> GameState {
    execute(state, effects).state
}

/// Read-only preview of one effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectPreview {
    pub effect: Effect,
    pub summary: String,
    /// How many composites enclose this effect.
    pub depth: usize,
    pub result: Result<(), Rejection>,
}

impl EffectPreview {
    /// Would this effect pass validation?
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.result.is_ok()
    }
}

/// Validate an effect list without applying anything.
///
/// Every leaf is checked against the unchanged input state, so effects
/// that depend on earlier ones in the list (spending gold just gained)
/// may preview differently than they execute.
#[must_use]
pub fn validate_effects(state: &GameState, effects: &[Effect]) -> Vec<EffectPreview> {
    let mut previews = Vec::new();
    for effect in effects {
        preview_into(state, effect, 0, &mut previews);
    }
    previews
}

fn preview_into(state: &GameState, effect: &Effect, depth: usize, out: &mut Vec<EffectPreview>) {
    let result = validate_at_depth(state, effect, depth);
    match effect {
        Effect::Composite { effects, .. } if result.is_ok() => {
            for child in effects {
                preview_into(state, child, depth + 1, out);
            }
        }
        _ => out.push(EffectPreview {
            effect: effect.clone(),
            summary: summarize(effect),
            depth,
            result,
        }),
    }
}

struct Run {
    report: ExecutionReport,
    sequence: u32,
}

impl Run {
    fn new(state: GameState) -> Self {
        Self {
            report: ExecutionReport::empty(state),
            sequence: 0,
        }
    }

    fn step(&mut self, effect: &Effect, depth: usize) {
        if let Err(reason) = validate_at_depth(&self.report.state, effect, depth) {
            self.skip(effect, depth, reason);
            return;
        }

        if let Effect::Composite { effects, .. } = effect {
            for child in effects {
                self.step(child, depth + 1);
            }
            return;
        }

        let before = self.report.state.digest();
        let next = apply(&self.report.state, effect);
        let after = next.digest();
        self.report.state = next;

        debug!(kind = %effect.kind(), source = effect.source(), depth, "effect applied");

        if let Effect::Narrative { text, .. } = effect {
            self.report.narrative.push(text.clone());
        }
        self.log(effect, depth, before, after, LogOutcome::Applied);
        self.report.applied.push(effect.clone());
    }

    fn skip(&mut self, effect: &Effect, depth: usize, reason: Rejection) {
        warn!(kind = %effect.kind(), source = effect.source(), %reason, "effect skipped");

        let digest = self.report.state.digest();
        self.log(effect, depth, digest.clone(), digest, LogOutcome::Skipped(reason.to_string()));
        self.report.skipped.push(SkippedEffect {
            effect: effect.clone(),
            reason,
        });
    }

    fn log(
        &mut self,
        effect: &Effect,
        depth: usize,
        before: crate::core::StateDigest,
        after: crate::core::StateDigest,
        outcome: LogOutcome,
    ) {
        self.report.log.push(LogEntry {
            sequence: self.sequence,
            kind: effect.kind(),
            target: effect.target().cloned(),
            source: effect.source().to_string(),
            depth,
            before,
            after,
            outcome,
        });
        self.sequence += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MAX_COMPOSITE_DEPTH;
    use crate::core::{PlayerState, Target};
    use crate::effects::EffectKind;

    fn state() -> GameState {
        GameState::new(PlayerState::new(100).with_currency(50))
    }

    #[test]
    fn test_reference_scenario() {
        let effects = [
            Effect::damage(Target::Player, 25),
            Effect::currency(-100),
            Effect::currency(30),
        ];

        let report = execute(state(), &effects);

        assert_eq!(report.state.player.health, 75);
        assert_eq!(report.state.player.currency, 80);
        assert_eq!(report.applied.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].effect, Effect::currency(-100));
        assert_eq!(report.skipped[0].reason.to_string(), "Insufficient gold");
    }

    #[test]
    fn test_validation_sees_earlier_effects() {
        // The spend is only affordable after the gain.
        let effects = [Effect::currency(60), Effect::currency(-100)];
        let report = execute(state(), &effects);

        assert!(report.is_clean());
        assert_eq!(report.state.player.currency, 10);
    }

    #[test]
    fn test_narrative_is_collected_in_order() {
        let effects = [
            Effect::narrative("The door creaks."),
            Effect::damage(Target::Player, 5),
            Effect::narrative("A dart grazes you."),
        ];
        let report = execute(state(), &effects);

        assert_eq!(report.narrative, vec!["The door creaks.", "A dart grazes you."]);
        assert_eq!(report.narration(), "The door creaks. A dart grazes you.");
    }

    #[test]
    fn test_composite_flattens_depth_first() {
        let effects = [Effect::composite(
            "trap",
            [
                Effect::damage(Target::Player, 10),
                Effect::composite("loot", [Effect::currency(5), Effect::currency(-500)]),
                Effect::experience(3),
            ],
        )];
        let report = execute(state(), &effects);

        let kinds: Vec<_> = report.log.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EffectKind::Damage,
                EffectKind::ModifyCurrency,
                EffectKind::ModifyCurrency,
                EffectKind::ModifyExperience,
            ]
        );
        assert_eq!(report.applied.len(), 3);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.log[2].depth, 2);
    }

    #[test]
    fn test_too_deep_composite_is_skipped() {
        let mut effect = Effect::currency(1);
        for _ in 0..=MAX_COMPOSITE_DEPTH {
            effect = Effect::composite("nest", [effect]);
        }
        let report = execute(state(), &[effect, Effect::currency(2)]);

        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(report.skipped[0].reason, Rejection::CompositeTooDeep(_)));
        assert_eq!(report.state.player.currency, 52);
    }

    #[test]
    fn test_log_records_before_and_after() {
        let report = execute(state(), &[Effect::damage(Target::Player, 10), Effect::currency(-99)]);

        assert_eq!(report.log.len(), 2);
        assert_eq!(report.log[0].sequence, 0);
        assert_eq!(report.log[0].before.player_health, 100);
        assert_eq!(report.log[0].after.player_health, 90);
        assert_eq!(report.log[0].outcome, LogOutcome::Applied);
        assert_eq!(report.log[1].before, report.log[1].after);
        assert_eq!(
            report.log[1].outcome,
            LogOutcome::Skipped("Insufficient gold".to_string())
        );
    }

    #[test]
    fn test_execute_state() {
        let s = execute_state(state(), &[Effect::heal(Target::Player, 10)]);
        assert_eq!(s.player.health, 100);
    }

    #[test]
    fn test_validate_effects_is_read_only() {
        let s = state();
        let previews = validate_effects(
            &s,
            &[
                Effect::damage(Target::Enemy, 5),
                Effect::composite("pair", [Effect::currency(10), Effect::currency(-60)]),
            ],
        );

        assert_eq!(previews.len(), 3);
        assert!(!previews[0].is_valid());
        assert_eq!(previews[0].summary, "Deal 5 damage to enemy");
        assert!(previews[1].is_valid());
        assert_eq!(previews[1].depth, 1);
        assert_eq!(previews[2].result, Err(Rejection::InsufficientGold));
        assert_eq!(s, state());
    }

    #[test]
    fn test_empty_list() {
        let report = execute(state(), &[]);
        assert!(report.is_clean());
        assert!(!report.any_applied());
        assert_eq!(report.state, state());
    }
}
